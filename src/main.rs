//! Stacker entry point
//!
//! Handles platform-specific initialization and starts the session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent};

    use stacker::platform::try_with_driver;
    use stacker::platform::web::{DomNotifier, WebInput, WebScheduler};
    use stacker::renderer::RenderState;
    use stacker::{Driver, GameConfig, Session};

    type WebDriver = Driver<Option<RenderState>, WebInput, WebScheduler, DomNotifier>;

    const TUTORIAL_TEXT: &str = "
        Start the game and see a row of blocks moving back and forth on a conveyor belt. <br /><br />
        Press any key or click to stop the blocks at the right time and stack them on top of each other.<br /><br />
        Keep stacking the blocks to reach the top of the machine.<br /><br />
        If you miss the timing, the block will fall off the stack and the game will be over.<br /><br />
        Retry the game if you don't reach the top.<br /><br />
        Good luck and have fun playing the stacker game!";

    /// Hidden help panel
    fn build_tutorial(document: &Document) -> Result<HtmlElement, JsValue> {
        let tutorial: HtmlElement = document.create_element("div")?.dyn_into()?;
        tutorial.class_list().add_1("tutorial")?;
        tutorial.set_inner_html(TUTORIAL_TEXT);
        tutorial.style().set_property("display", "none")?;
        Ok(tutorial)
    }

    /// Button that shows/hides the help panel
    fn build_tutorial_button(document: &Document, tutorial: HtmlElement) -> Result<Element, JsValue> {
        let container = document.create_element("div")?;
        container.class_list().add_1("tutorial-btn-container")?;
        let button = document.create_element("button")?;
        button.class_list().add_1("tutorial-btn")?;
        button.set_inner_html("Tutorial");

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let style = tutorial.style();
            let shown = style.get_property_value("display").unwrap_or_default() == "block";
            let _ = style.set_property("display", if shown { "none" } else { "block" });
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();

        container.append_child(&button)?;
        Ok(container)
    }

    async fn init_renderer(canvas: HtmlCanvasElement, width: u32, height: u32) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas)) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {:?}", e);
                return None;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {:?}", e);
                return None;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(state) => Some(state),
            Err(e) => {
                log::error!("Failed to create device: {:?}", e);
                None
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Stacker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");
        let app = document.get_element_by_id("app").expect("no #app element");

        let notifier = DomNotifier::new(&document, &app);
        let tutorial = match build_tutorial(&document) {
            Ok(tutorial) => {
                let _ = app.append_child(&tutorial);
                Some(tutorial)
            }
            Err(e) => {
                log::warn!("Failed to build tutorial: {:?}", e);
                None
            }
        };

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let renderer = init_renderer(canvas, width, height).await;

        let session = match Session::new(GameConfig::default()) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid board configuration: {}", e);
                return;
            }
        };

        let driver: Rc<RefCell<WebDriver>> = Rc::new(RefCell::new(Driver::new(
            session,
            renderer,
            WebInput::new(&document, "click"),
            WebScheduler::new(),
            notifier,
        )));
        bind_callbacks(&driver);
        driver.borrow_mut().start();

        if let (Some(tutorial), Some(body)) = (tutorial, document.body()) {
            match build_tutorial_button(&document, tutorial) {
                Ok(button) => {
                    let _ = body.append_child(&button);
                }
                Err(e) => log::warn!("Failed to build tutorial button: {:?}", e),
            }
        }

        log::info!("Stacker running!");
    }

    fn bind_callbacks(driver: &Rc<RefCell<WebDriver>>) {
        let weak = Rc::downgrade(driver);
        driver.borrow_mut().scheduler.bind(move || {
            try_with_driver(&weak, |d| d.tick());
        });

        let weak = Rc::downgrade(driver);
        driver.borrow_mut().input.bind(move || {
            try_with_driver(&weak, |d| d.stop_trigger());
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use stacker::platform::{InputSource, ManualScheduler, Notifier};
    use stacker::renderer::TextRenderer;
    use stacker::sim::Grid;
    use stacker::{ConfigError, Driver, GameConfig, Session};

    /// Simulated milliseconds per autopilot step
    const STEP_MS: u32 = 10;
    /// Give up after this much simulated time
    const MAX_SIM_MS: u64 = 10 * 60 * 1000;

    /// The autopilot is the only input; this just records attach/detach
    #[derive(Default)]
    pub struct AutopilotInput {
        pub attached: bool,
    }

    impl InputSource for AutopilotInput {
        fn attach(&mut self) {
            self.attached = true;
        }

        fn detach(&mut self) {
            self.attached = false;
            log::info!("input detached");
        }
    }

    #[derive(Default)]
    pub struct LogNotifier {
        pub outcome: Option<&'static str>,
    }

    impl Notifier for LogNotifier {
        fn on_win(&mut self) {
            log::info!("You won!");
            self.outcome = Some("won");
        }

        fn on_loss(&mut self) {
            log::info!("You lost! :(");
            self.outcome = Some("lost");
        }
    }

    pub fn load_config(path: Option<String>) -> Result<GameConfig, ConfigError> {
        let Some(path) = path else {
            return Ok(GameConfig::default());
        };
        let json = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded config from {}", path);
        GameConfig::from_json(&json)
    }

    /// Drop when the platform overlaps the row beneath as much as it can
    fn should_drop(grid: &Grid) -> bool {
        let Some(row) = grid.active_row() else {
            return false;
        };
        let placed = grid.occupied_in_row(row);
        if placed == 0 {
            return false;
        }
        if row + 1 == grid.height() {
            return true;
        }
        let below = grid.occupied_in_row(row + 1);
        let overlap = (0..grid.width())
            .filter(|&col| grid.is_occupied(row, col) && grid.is_occupied(row + 1, col))
            .count();
        overlap == placed.min(below)
    }

    pub fn run(config: GameConfig) -> Result<(), ConfigError> {
        let session = Session::new(config)?;
        let mut driver = Driver::new(
            session,
            TextRenderer::new(),
            AutopilotInput::default(),
            ManualScheduler::new(),
            LogNotifier::default(),
        );
        driver.start();

        let mut elapsed: u64 = 0;
        while !driver.session().is_over() && elapsed < MAX_SIM_MS {
            elapsed += u64::from(STEP_MS);
            let due = driver.scheduler.advance(STEP_MS);
            for _ in 0..due {
                driver.tick();
                if should_drop(driver.session().grid()) {
                    driver.stop_trigger();
                    break;
                }
            }
        }

        println!("{}", driver.renderer.frame);
        match driver.notifier.outcome {
            Some(outcome) => println!("Game {} after {:.1}s simulated", outcome, elapsed as f64 / 1000.0),
            None => println!("No result after {:.1}s simulated", elapsed as f64 / 1000.0),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Stacker (native) starting...");
    log::info!("Native mode plays an autopilot session - run with `trunk serve` for the web version");

    let result = native::load_config(std::env::args().nth(1)).and_then(native::run);
    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
