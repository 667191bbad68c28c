use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use portal_core::{
    classify_link, fetch_tools, resolve_internal, submit_tool, DirectoryState, IdentityProvider,
    LinkTarget, PortalApi, PortalConfig, UrlProbe,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use super::app::{App, Screen};
use super::render::render;
use super::types::{DisplayEvent, InfoBar};

// ── background operations ────────────────────────────────────────────────────

fn spawn_fetch(
    tx: &mpsc::Sender<DisplayEvent>,
    identity: &Arc<dyn IdentityProvider>,
    api: &Arc<PortalApi>,
    scopes: &Arc<Vec<String>>,
    app: &mut App,
) {
    app.fetching = true;
    let tx = tx.clone();
    let identity = Arc::clone(identity);
    let api = Arc::clone(api);
    let scopes = Arc::clone(scopes);
    tokio::spawn(async move {
        let result = fetch_tools(identity.as_ref(), &api, &scopes).await;
        let _ = tx.send(DisplayEvent::ToolsFetched(result)).await;
    });
}

fn spawn_probe(tx: &mpsc::Sender<DisplayEvent>, probe: &Arc<UrlProbe>, url: String) {
    let tx = tx.clone();
    let probe = Arc::clone(probe);
    tokio::spawn(async move {
        let outcome = probe.check(&url).await;
        let _ = tx.send(DisplayEvent::ProbeDone { url, outcome }).await;
    });
}

fn spawn_submit(
    tx: &mpsc::Sender<DisplayEvent>,
    identity: &Arc<dyn IdentityProvider>,
    api: &Arc<PortalApi>,
    scopes: &Arc<Vec<String>>,
    payload: portal_core::NewTool,
) {
    let tx = tx.clone();
    let identity = Arc::clone(identity);
    let api = Arc::clone(api);
    let scopes = Arc::clone(scopes);
    tokio::spawn(async move {
        let result = submit_tool(identity.as_ref(), &api, &scopes, &payload).await;
        let _ = tx.send(DisplayEvent::SubmitDone(result)).await;
    });
}

fn open_selected(app: &mut App, base_url: &str) {
    let DirectoryState::Ready(tools) = &app.directory else {
        return;
    };
    let Some(tool) = tools.get(app.selected) else {
        return;
    };
    let url = match classify_link(&tool.target_path) {
        LinkTarget::External(url) => url,
        LinkTarget::Internal(path) => resolve_internal(base_url, &path),
        LinkTarget::Untrusted => {
            app.status = format!("'{}' is not a navigable link", tool.target_path);
            return;
        }
    };
    app.status = match open::that(&url) {
        Ok(()) => format!("opened {url}"),
        Err(e) => format!("failed to open {url}: {e}"),
    };
}

// ── main entry ───────────────────────────────────────────────────────────────

pub async fn run(config: PortalConfig, identity: Arc<dyn IdentityProvider>) -> Result<()> {
    let api = Arc::new(PortalApi::new(config.api_base_url.clone()));
    let probe = Arc::new(UrlProbe::with_timeout(Duration::from_secs(
        config.probe_timeout_secs,
    )));
    let scopes = Arc::new(config.api_scopes());
    let info = InfoBar {
        api: config.api_base_url.clone(),
        account: identity
            .accounts()
            .first()
            .map(|a| a.username.clone())
            .unwrap_or_else(|| "no account".to_string()),
    };

    // Terminal setup — install a panic hook so we always restore the terminal
    // even if something panics, otherwise the shell is left in raw mode.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    // Keyboard reader thread
    let (key_tx, mut key_rx) = mpsc::channel::<Event>(32);
    tokio::task::spawn_blocking(move || loop {
        if event::poll(Duration::from_millis(100)).unwrap_or(false) {
            if let Ok(ev) = event::read() {
                if key_tx.blocking_send(ev).is_err() {
                    break;
                }
            }
        }
    });

    let mut app = App::new();
    let (tx, mut rx) = mpsc::channel::<DisplayEvent>(16);
    let mut signed_out = false;

    // Activation: the directory starts loading and fetches immediately.
    spawn_fetch(&tx, &identity, &api, &scopes, &mut app);

    'main: loop {
        terminal.draw(|f| render(&mut app, &info, f))?;

        tokio::select! {
            // ── keyboard ──
            key = key_rx.recv() => {
                let Some(ev) = key else { break };
                let Event::Key(key) = ev else { continue 'main };
                if key.kind != KeyEventKind::Press { continue 'main; }

                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break 'main;
                }

                match app.screen {
                    Screen::Directory => match key.code {
                        KeyCode::Char('q') => break 'main,
                        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            if let Err(e) = identity.logout().await {
                                app.status = e.to_string();
                            } else {
                                signed_out = true;
                                break 'main;
                            }
                        }
                        KeyCode::Char('r') => {
                            // Ignored while a fetch is already in flight.
                            if !app.fetching {
                                app.status.clear();
                                spawn_fetch(&tx, &identity, &api, &scopes, &mut app);
                            }
                        }
                        KeyCode::Char('a') => app.enter_form(),
                        KeyCode::Up => app.select_up(),
                        KeyCode::Down => app.select_down(),
                        KeyCode::Enter => open_selected(&mut app, api.base_url()),
                        _ => {}
                    },
                    Screen::AddTool => match key.code {
                        KeyCode::Esc => app.leave_form(),
                        KeyCode::Tab | KeyCode::Enter => {
                            app.set_focus(app.focus.next());
                        }
                        KeyCode::BackTab => app.set_focus(app.focus.prev()),
                        KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            if app.form.begin_check() {
                                app.form_error.clear();
                                spawn_probe(&tx, &probe, app.form.target_path().to_string());
                            }
                        }
                        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            if app.form.begin_submit() {
                                app.form_error.clear();
                                spawn_submit(&tx, &identity, &api, &scopes, app.form.payload());
                            } else if !app.form.is_submitting() && !app.form.validation().checking {
                                app.form_error = if !app.form.is_complete() {
                                    "All fields are required".to_string()
                                } else {
                                    "Please validate the URL before submitting".to_string()
                                };
                            }
                        }
                        KeyCode::Left => app.cursor_left(),
                        KeyCode::Right => app.cursor_right(),
                        KeyCode::Backspace => app.backspace(),
                        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.insert_char(c);
                        }
                        _ => {}
                    },
                }
            }

            // ── background results ──
            ev = rx.recv() => {
                match ev {
                    None => {}
                    Some(DisplayEvent::ToolsFetched(result)) => {
                        app.fetching = false;
                        app.directory.apply(result);
                        app.clamp_selection();
                    }
                    Some(DisplayEvent::ProbeDone { url, outcome }) => {
                        // A result for an edited URL is stale; the edit
                        // already reset the validation state.
                        if url == app.form.target_path() {
                            app.form.finish_check(outcome);
                        }
                    }
                    Some(DisplayEvent::SubmitDone(result)) => {
                        app.form.finish_submit();
                        match result {
                            Ok(()) => {
                                app.leave_form();
                                app.status = "Tool added — press r to refresh".to_string();
                            }
                            Err(e) => app.form_error = e.to_string(),
                        }
                    }
                }
            }

            // ── spinner tick ──
            _ = tokio::time::sleep(Duration::from_millis(80)) => {
                if app.busy() { app.spin_i += 1; }
                // The identity provider was mid-operation at activation:
                // keep loading and retry until it settles.
                if app.screen == Screen::Directory
                    && app.directory.is_loading()
                    && !app.fetching
                {
                    spawn_fetch(&tx, &identity, &api, &scopes, &mut app);
                }
            }
        }
    }

    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    if signed_out {
        println!("Signed out. Run portal again to sign back in.");
    }
    Ok(())
}
