//! Song Bingo entry point
//!
//! The wasm build wires the session into the page; the native build prints
//! the resolved card to the terminal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::MouseEvent;

    use song_bingo::persistence::{KeyValueStore, MemoryStore};
    use song_bingo::platform::web::{
        WebStore, page_base_url, page_request, replace_page_request, window_config_json,
        window_songs,
    };
    use song_bingo::share::{ShareChannel, ShareOutcome};
    use song_bingo::{BingoConfig, BingoError, BingoSession, Navigation, escape_html};

    type Session = BingoSession<Box<dyn KeyValueStore>>;

    // Native share sheet when available, clipboard otherwise
    #[wasm_bindgen(inline_js = "
        export function share_link(title, url) {
            if (navigator.share) {
                return navigator.share({ title, url }).then(() => 'native');
            }
            return navigator.clipboard.writeText(url).then(() => 'clipboard');
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        fn share_link(title: &str, url: &str) -> Result<js_sys::Promise, JsValue>;
    }

    fn alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn on_click<F>(id: &str, handler: F)
    where
        F: FnMut(MouseEvent) + 'static,
    {
        let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Rebuild the board for the active card
    fn render(session: &Rc<RefCell<Session>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(board) = document.get_element_by_id("board") else {
            log::error!("No #board element");
            return;
        };

        board.set_inner_html("");
        if let Some(label) = document.get_element_by_id("cardLabel") {
            label.set_text_content(Some(&session.borrow().label()));
        }

        let cells = session.borrow().cells();
        for cell in cells {
            let Ok(button) = document.create_element("button") else {
                continue;
            };
            button.set_class_name(if cell.marked { "cell marked" } else { "cell" });
            let _ = button.set_attribute("title", &cell.label);
            button.set_inner_html(&format!(
                "<span class=\"song\">{}</span>",
                escape_html(&cell.label)
            ));

            let position = cell.position;
            let session = session.clone();
            let target = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(marked) = session.borrow_mut().on_cell_toggle(position) {
                    let _ = target.class_list().toggle_with_force("marked", marked);
                }
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();

            let _ = board.append_child(&button);
        }
    }

    fn setup_reset_button(session: Rc<RefCell<Session>>) {
        on_click("resetBtn", move |_event| {
            session.borrow_mut().on_reset();
            render(&session);
        });
    }

    fn setup_navigation(session: Rc<RefCell<Session>>) {
        for (id, navigation) in [
            ("prevBtn", Navigation::Prev),
            ("nextBtn", Navigation::Next),
            ("randomBtn", Navigation::Random),
        ] {
            let session = session.clone();
            on_click(id, move |_event| {
                session.borrow_mut().on_navigate(navigation);
                replace_page_request(session.borrow().request());
                render(&session);
            });
        }
    }

    fn setup_share_button(session: Rc<RefCell<Session>>) {
        on_click("shareBtn", move |_event| {
            let payload = session.borrow().share_payload(&page_base_url());
            wasm_bindgen_futures::spawn_local(async move {
                let result = match share_link(&payload.title, &payload.url) {
                    Ok(promise) => JsFuture::from(promise)
                        .await
                        .map(|channel| match channel.as_string().as_deref() {
                            Some("native") => ShareChannel::Native,
                            _ => ShareChannel::Clipboard,
                        })
                        .map_err(|err| BingoError::ShareCapability(format!("{:?}", err))),
                    Err(err) => Err(BingoError::ShareCapability(format!("{:?}", err))),
                };

                let outcome = ShareOutcome::settle(&payload, result);
                if let Some(notice) = outcome.notice() {
                    alert(notice);
                }
                if let ShareOutcome::ManualCopy { prompt, url } = outcome {
                    if let Some(window) = web_sys::window() {
                        let _ = window.prompt_with_message_and_default(&prompt, &url);
                    }
                }
            });
        });
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Song Bingo starting...");

        let config = match window_config_json() {
            Some(json) => match BingoConfig::from_json(&json) {
                Ok(config) => config,
                Err(err) => {
                    alert(&err.to_string());
                    return;
                }
            },
            None => BingoConfig::default(),
        };
        let pool = config.build_pool(window_songs());

        let store: Box<dyn KeyValueStore> = match WebStore::local() {
            Some(store) => Box::new(store),
            None => {
                log::warn!("LocalStorage unavailable, marks will not survive reload");
                Box::new(MemoryStore::new())
            }
        };

        let seed: u64 = rand::random();
        let session = match BingoSession::open(config, &pool, store, page_request(), seed) {
            Ok(session) => session,
            Err(err) => {
                log::error!("{}", err);
                alert(&err.to_string());
                return;
            }
        };
        replace_page_request(session.request());

        let session = Rc::new(RefCell::new(session));
        render(&session);
        setup_reset_button(session.clone());
        setup_navigation(session.clone());
        setup_share_button(session);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    if let Err(err) = native::run(std::env::args().skip(1)) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;

    use song_bingo::persistence::FileStore;
    use song_bingo::{
        BingoConfig, BingoError, BingoSession, CardRequest, KeyValueStore, SelectionPolicy,
        Variant,
    };

    const USAGE: &str = "usage: song-bingo [--variant NAME] [--paged] [--new] [--card N] [--store PATH] [SONGS_FILE]";

    pub fn run(args: impl Iterator<Item = String>) -> Result<(), BingoError> {
        let mut variant = Variant::default();
        let mut paged = false;
        let mut request = CardRequest::default();
        let mut store_path = ".song-bingo.json".to_string();
        let mut songs_file = None;

        let mut args = args;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--variant" => {
                    let name = args.next().unwrap_or_default();
                    variant = Variant::from_str(&name).ok_or_else(|| {
                        BingoError::InvalidConfig(format!("unknown variant '{}'", name))
                    })?;
                }
                "--paged" => paged = true,
                "--new" => request.set("new", "1"),
                "--card" => request.set("card", args.next().unwrap_or_default()),
                "--store" => {
                    store_path = args
                        .next()
                        .ok_or_else(|| BingoError::InvalidConfig(USAGE.to_string()))?
                }
                "-h" | "--help" => {
                    println!("{}", USAGE);
                    return Ok(());
                }
                _ => songs_file = Some(arg),
            }
        }

        let mut config = BingoConfig::from_variant(variant);
        if paged {
            config.policy = SelectionPolicy::Paged;
        }

        let songs: Vec<String> = match songs_file {
            Some(path) => fs::read_to_string(&path)
                .map_err(|err| BingoError::InvalidConfig(format!("{}: {}", path, err)))?
                .lines()
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };
        let pool = config.build_pool(songs);

        let store = FileStore::open(store_path);
        let session = BingoSession::open(config, &pool, store, request, rand::random())?;
        print_card(&session);
        Ok(())
    }

    fn print_card<S: KeyValueStore>(session: &BingoSession<S>) {
        let cells = session.cells();
        let width = cells.iter().map(|c| c.label.chars().count()).max().unwrap_or(0);
        let cols = session.config().cols;

        println!("{}", session.label());
        for row in cells.chunks(cols) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| {
                    let mark = if cell.marked { 'x' } else { ' ' };
                    format!("[{}] {:<width$}", mark, cell.label, width = width)
                })
                .collect();
            println!("{}", line.join("  "));
        }
        println!("Link: {}", session.request());
    }
}
