//! Main Application
//!
//! The App struct manages the TUI lifecycle:
//! - Event loop (keyboard, resize) over crossterm's async EventStream
//! - One RequestController per concern: home feed, category listing,
//!   generator, explain overlay, visualize overlay
//! - Per-frame controller polling, selection clamping, and rendering
//!
//! Every user action maps to one intent method. Intents validate locally
//! where they can (an empty topic never reaches the gateway) and otherwise
//! hand an async gateway call to the concern's controller; the render pass
//! only ever reads controller state.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use quotes_core::{
    dedup_by_text, notices, random_category, Category, Quote, QuoteGateway, RequestController,
    CATEGORIES,
};

use crate::ui;

/// How long the "Copied!" acknowledgment stays on screen.
const COPIED_FLASH: Duration = Duration::from_secs(2);

/// Frame tick; drives the spinner and controller polling.
const TICK: Duration = Duration::from_millis(100);

/// Which page the surface is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// Quote of the day, the feed, and the category shelves.
    Home,
    /// One category's quotes.
    Category,
    /// Topic input and the generated quote card.
    Generator,
}

/// Modal overlay above the current view.
#[derive(Clone, Debug, Default)]
pub enum Overlay {
    /// No overlay open.
    #[default]
    None,
    /// Explanation panel for a quote.
    Explain {
        /// The quote being explained.
        quote: Quote,
    },
    /// Visual panel for a quote.
    Visualize {
        /// The quote being visualized.
        quote: Quote,
    },
}

/// Focus within the generator view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorFocus {
    /// The topic input line.
    Input,
    /// The generated quote card.
    Result,
}

/// Main application state
pub struct App {
    // === Core State ===
    /// Is the app still running?
    running: bool,
    /// Current page.
    pub(crate) view: View,
    /// Current overlay, if any.
    pub(crate) overlay: Overlay,

    // === Gateway ===
    /// The generative backend, injected at startup.
    gateway: Arc<dyn QuoteGateway>,
    /// Where generated quote visuals are saved.
    visuals_dir: PathBuf,

    // === Controllers, one per concern ===
    /// Home feed (deduplicated listing of a random category).
    pub(crate) home: RequestController<Vec<Quote>>,
    /// Listing for the actively browsed category.
    pub(crate) category: RequestController<Vec<Quote>>,
    /// Generated quote for the submitted topic.
    pub(crate) generator: RequestController<Quote>,
    /// Explanation prose for the overlay quote.
    pub(crate) explain: RequestController<String>,
    /// Saved path of the overlay quote's visual.
    pub(crate) visualize: RequestController<PathBuf>,

    // === Selection State ===
    /// Which shelf the home feed was curated from.
    pub(crate) home_category: &'static Category,
    /// The category being browsed, once one is selected.
    pub(crate) active_category: Option<&'static Category>,
    /// Selected quote in the home feed (0 = the hero card).
    pub(crate) feed_selected: usize,
    /// Selected shelf in the home category row.
    pub(crate) shelf_selected: usize,
    /// Selected quote on the category page.
    pub(crate) listing_selected: usize,

    // === Generator State ===
    /// Topic input buffer.
    pub(crate) topic_input: String,
    /// Whether keys go to the input or the result card.
    pub(crate) generator_focus: GeneratorFocus,

    // === Clipboard ===
    /// System clipboard handle; None when the platform has none.
    clipboard: Option<arboard::Clipboard>,
    /// When the last copy happened, for the transient acknowledgment.
    copied_at: Option<Instant>,

    // === Render State ===
    /// Monotonic tick counter for the loading spinner.
    pub(crate) spinner_frame: usize,
}

impl App {
    /// Create the app and trigger the initial home feed.
    ///
    /// Must be called within a tokio runtime; the feed request is spawned
    /// immediately so the first frames render a loader instead of a blank
    /// screen.
    pub fn new(gateway: Arc<dyn QuoteGateway>, visuals_dir: PathBuf) -> Self {
        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard unavailable; copy is disabled");
                None
            }
        };

        let mut app = Self {
            running: true,
            view: View::Home,
            overlay: Overlay::None,
            gateway,
            visuals_dir,
            home: RequestController::new(),
            category: RequestController::new(),
            generator: RequestController::new(),
            explain: RequestController::new(),
            visualize: RequestController::new(),
            home_category: &CATEGORIES[0],
            active_category: None,
            feed_selected: 0,
            shelf_selected: 0,
            listing_selected: 0,
            topic_input: String::new(),
            generator_focus: GeneratorFocus::Input,
            clipboard,
            copied_at: None,
            spinner_frame: 0,
        };
        app.refresh_home();
        app
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render the first frame immediately so the user sees the UI.
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events take priority over the tick.
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key);
                            }
                            // Full redraw every frame; nothing to do beyond
                            // letting ratatui pick up the new size.
                            Event::Resize(_, _) => {}
                            _ => {}
                        }
                    }
                }

                _ = tokio::time::sleep(TICK) => {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }

            // Apply any gateway outcomes that landed since the last frame.
            self.poll_controllers();

            self.update();
            self.render(terminal)?;
        }

        Ok(())
    }

    fn poll_controllers(&mut self) {
        self.home.poll();
        self.category.poll();
        self.generator.poll();
        self.explain.poll();
        self.visualize.poll();
    }

    /// Expire the copy acknowledgment and clamp selections to the lists
    /// currently on screen.
    fn update(&mut self) {
        if let Some(at) = self.copied_at {
            if at.elapsed() >= COPIED_FLASH {
                self.copied_at = None;
            }
        }

        let feed_len = self.home.value().map_or(0, Vec::len);
        self.feed_selected = clamp_selection(self.feed_selected, feed_len);

        let listing_len = self.category.value().map_or(0, Vec::len);
        self.listing_selected = clamp_selection(self.listing_selected, listing_len);
    }

    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        terminal.draw(|frame| ui::draw(frame, self))?;
        Ok(())
    }

    /// Whether the "Copied!" acknowledgment is currently showing.
    pub(crate) fn copied_flash(&self) -> bool {
        self.copied_at.is_some()
    }

    // =========================================================================
    // Key Handling
    // =========================================================================

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C quits from anywhere, even with an overlay open.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        if !matches!(self.overlay, Overlay::None) {
            if key.code == KeyCode::Esc {
                self.close_overlay();
            }
            return;
        }

        match self.view {
            View::Home => self.handle_home_key(key),
            View::Category => self.handle_category_key(key),
            View::Generator => self.handle_generator_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('r') => self.refresh_home(),
            KeyCode::Char('g') => self.view = View::Generator,

            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.home.value().map_or(0, Vec::len);
                if len > 0 {
                    self.feed_selected = (self.feed_selected + 1).min(len - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.feed_selected = self.feed_selected.saturating_sub(1);
            }

            KeyCode::Right | KeyCode::Char('l') => {
                self.shelf_selected = (self.shelf_selected + 1) % CATEGORIES.len();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.shelf_selected = self
                    .shelf_selected
                    .checked_sub(1)
                    .unwrap_or(CATEGORIES.len() - 1);
            }
            KeyCode::Enter => self.select_category(&CATEGORIES[self.shelf_selected]),

            KeyCode::Char('e') => {
                if let Some(quote) = self.selected_quote() {
                    self.open_explain(quote);
                }
            }
            KeyCode::Char('v') => {
                if let Some(quote) = self.selected_quote() {
                    self.open_visualize(quote);
                }
            }
            KeyCode::Char('y') => self.copy_selected(),

            _ => {}
        }
    }

    fn handle_category_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view = View::Home,
            KeyCode::Char('g') => self.view = View::Generator,

            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.category.value().map_or(0, Vec::len);
                if len > 0 {
                    self.listing_selected = (self.listing_selected + 1).min(len - 1);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.listing_selected = self.listing_selected.saturating_sub(1);
            }

            KeyCode::Char('e') => {
                if let Some(quote) = self.selected_quote() {
                    self.open_explain(quote);
                }
            }
            KeyCode::Char('v') => {
                if let Some(quote) = self.selected_quote() {
                    self.open_visualize(quote);
                }
            }
            KeyCode::Char('y') => self.copy_selected(),

            _ => {}
        }
    }

    fn handle_generator_key(&mut self, key: KeyEvent) {
        match self.generator_focus {
            GeneratorFocus::Input => match key.code {
                KeyCode::Esc => self.view = View::Home,
                KeyCode::Tab => self.generator_focus = GeneratorFocus::Result,
                KeyCode::Enter => self.submit_topic(),
                KeyCode::Backspace => {
                    self.topic_input.pop();
                }
                KeyCode::Char(c) => self.topic_input.push(c),
                _ => {}
            },
            GeneratorFocus::Result => match key.code {
                KeyCode::Esc => self.view = View::Home,
                KeyCode::Tab => self.generator_focus = GeneratorFocus::Input,
                KeyCode::Char('e') => {
                    if let Some(quote) = self.selected_quote() {
                        self.open_explain(quote);
                    }
                }
                KeyCode::Char('v') => {
                    if let Some(quote) = self.selected_quote() {
                        self.open_visualize(quote);
                    }
                }
                KeyCode::Char('y') => self.copy_selected(),
                _ => {}
            },
        }
    }

    // =========================================================================
    // Intents
    // =========================================================================

    /// Curate a fresh home feed from a random shelf.
    fn refresh_home(&mut self) {
        let category = random_category();
        self.home_category = category;
        self.feed_selected = 0;

        let gateway = Arc::clone(&self.gateway);
        let name = category.name.to_string();
        self.home.trigger(notices::FEED_UNAVAILABLE, async move {
            gateway
                .list_quotes_by_category(&name)
                .await
                .map(dedup_by_text)
        });
    }

    /// Browse one category: move the view and trigger its listing in one
    /// step. A rapid second selection supersedes the first.
    fn select_category(&mut self, category: &'static Category) {
        self.active_category = Some(category);
        self.listing_selected = 0;
        self.view = View::Category;

        let gateway = Arc::clone(&self.gateway);
        let name = category.name.to_string();
        self.category
            .trigger(notices::category_unavailable(category.name), async move {
                gateway.list_quotes_by_category(&name).await
            });
    }

    /// Submit the topic input. An empty topic fails the concern locally
    /// and never reaches the gateway.
    fn submit_topic(&mut self) {
        let topic = self.topic_input.trim().to_string();
        if topic.is_empty() {
            self.generator.fail(notices::EMPTY_TOPIC);
            return;
        }

        let gateway = Arc::clone(&self.gateway);
        self.generator
            .trigger(notices::GENERATOR_FAILED, async move {
                gateway.generate_quote(&topic).await
            });
    }

    /// Open the explain overlay for a quote and request its explanation.
    fn open_explain(&mut self, quote: Quote) {
        let gateway = Arc::clone(&self.gateway);
        let text = quote.text().to_string();
        let author = quote.author().to_string();
        self.explain.trigger(notices::EXPLAIN_FAILED, async move {
            gateway.explain_quote(&text, &author).await
        });
        self.overlay = Overlay::Explain { quote };
    }

    /// Open the visualize overlay for a quote: generate the image and save
    /// it under the visuals directory. Terminals don't render JPEGs; the
    /// saved file is the deliverable and the overlay shows its path.
    fn open_visualize(&mut self, quote: Quote) {
        let gateway = Arc::clone(&self.gateway);
        let dir = self.visuals_dir.clone();
        let text = quote.text().to_string();
        self.visualize.trigger(notices::VISUALIZE_FAILED, async move {
            save_visual(gateway, dir, text).await
        });
        self.overlay = Overlay::Visualize { quote };
    }

    /// Close the overlay and reset its concern; a reopened panel always
    /// starts a fresh request.
    fn close_overlay(&mut self) {
        match self.overlay {
            Overlay::Explain { .. } => self.explain.reset(),
            Overlay::Visualize { .. } => self.visualize.reset(),
            Overlay::None => {}
        }
        self.overlay = Overlay::None;
    }

    /// Copy the selected quote to the system clipboard as
    /// `"quote" - author` and show the transient acknowledgment.
    fn copy_selected(&mut self) {
        let Some(quote) = self.selected_quote() else {
            return;
        };
        let Some(clipboard) = self.clipboard.as_mut() else {
            tracing::warn!("No clipboard on this platform; copy ignored");
            return;
        };
        match clipboard.set_text(quote.attribution_line()) {
            Ok(()) => self.copied_at = Some(Instant::now()),
            Err(e) => tracing::warn!(error = %e, "Clipboard write failed"),
        }
    }

    /// The quote the current view's selection points at, if any.
    fn selected_quote(&self) -> Option<Quote> {
        match self.view {
            View::Home => self
                .home
                .value()
                .and_then(|feed| feed.get(self.feed_selected))
                .cloned(),
            View::Category => self
                .category
                .value()
                .and_then(|listing| listing.get(self.listing_selected))
                .cloned(),
            View::Generator => match self.generator_focus {
                GeneratorFocus::Result => self.generator.value().cloned(),
                GeneratorFocus::Input => None,
            },
        }
    }
}

/// Generate a quote's visual and persist it with a timestamped name.
async fn save_visual(
    gateway: Arc<dyn QuoteGateway>,
    dir: PathBuf,
    quote_text: String,
) -> anyhow::Result<PathBuf> {
    let image = gateway.generate_quote_image(&quote_text).await?;

    tokio::fs::create_dir_all(&dir).await?;
    let extension = match image.mime_type.as_str() {
        "image/png" => "png",
        _ => "jpg",
    };
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let path = dir.join(format!("quote-{stamp}.{extension}"));
    tokio::fs::write(&path, &image.bytes).await?;

    tracing::info!(path = %path.display(), "Saved quote visual");
    Ok(path)
}

/// Keep a selection inside a list that may have shrunk or emptied.
fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        selected.min(len - 1)
    }
}
