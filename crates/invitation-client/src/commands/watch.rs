//! The live view: countdown, buttons and music, driven from stdin.

use std::io::Write;

use invitation_core::{
    CalendarLinkBuilder, CountdownClock, CountdownSnapshot, OutputFormat, Variant,
};
use invitation_runtime::{
    AudioSink, CommandSink, ShutdownSignal, SignalHandler, Ticker, UserAction, ViewEffect,
    ViewSession,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::actions;
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::render::{HELP, Renderer};

/// Options resolved from the command line and configuration.
#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub variant: Variant,
    pub format: OutputFormat,
    pub hyperlinks: bool,
    pub seed: u64,
}

/// A line typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Action(UserAction),
    Quit,
}

/// Parses a command line. Returns `None` for blank or unknown input.
pub fn parse_input(line: &str) -> Option<Input> {
    let input = match line.trim().to_lowercase().as_str() {
        "si" | "sí" | "s" | "yes" | "y" => Input::Action(UserAction::PressYes),
        "no" | "n" => Input::Action(UserAction::PressNo),
        "music" | "musica" | "música" | "m" => Input::Action(UserAction::ToggleMusic),
        "calendar" | "calendario" | "c" => Input::Action(UserAction::ExportCalendar),
        "quit" | "q" | "exit" | "salir" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

/// Why the view closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Quit,
    EndOfInput,
    Signal,
    TickerGone,
}

/// Runs the live view until the user quits, stdin closes, or a signal arrives.
pub async fn run(config: &ClientConfig, options: ViewOptions) -> ClientResult<()> {
    let event = config.event.to_calendar_event()?;
    let calendar_url = CalendarLinkBuilder::google().build(&event);

    let clock = CountdownClock::new(event.end, options.variant.initial_phase());
    let mut ticker = Ticker::with_system_clock(config.ticker.to_ticker_config(), clock)?.spawn();

    let signals = SignalHandler::new();
    signals.spawn_listener()?;

    let sink = CommandSink::new(
        config.audio.player.clone(),
        config.audio.args.clone(),
        config.assets.audio_url(),
    );
    let mut session = ViewSession::new(
        options.variant,
        ticker.latest(),
        sink,
        Some(calendar_url),
        options.seed,
    );
    session.activate();

    let renderer = Renderer::new(
        options.variant,
        options.hyperlinks,
        config.display.details.clone(),
        options.format,
    );

    let result = drive(
        &mut session,
        ticker.subscribe(),
        BufReader::new(tokio::io::stdin()),
        signals.shutdown(),
        &renderer,
        &mut std::io::stdout(),
        actions::open_url,
    )
    .await;

    session.teardown();
    ticker.stop().await?;

    let exit = result?;
    debug!(?exit, "View closed");
    Ok(())
}

/// The view loop.
///
/// Redraws on every snapshot and every input line. `open_link` carries out
/// [`ViewEffect::OpenUrl`].
pub async fn drive<S, R, W, F>(
    session: &mut ViewSession<S>,
    mut snapshots: watch::Receiver<CountdownSnapshot>,
    input: R,
    shutdown: ShutdownSignal,
    renderer: &Renderer,
    out: &mut W,
    mut open_link: F,
) -> ClientResult<Exit>
where
    S: AudioSink,
    R: AsyncBufRead + Unpin,
    W: Write,
    F: FnMut(&str) -> ClientResult<()>,
{
    let mut lines = input.lines();
    let mut notice: Option<String> = None;
    let shutdown = shutdown.wait();
    tokio::pin!(shutdown);

    draw(renderer, session, notice.as_deref(), out)?;

    let exit = loop {
        tokio::select! {
            () = &mut shutdown => break Exit::Signal,

            changed = snapshots.changed() => {
                if changed.is_err() {
                    break Exit::TickerGone;
                }
                let snapshot = *snapshots.borrow_and_update();
                if session.observe(snapshot).is_some() {
                    notice = None;
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    break Exit::EndOfInput;
                };
                match parse_input(&line) {
                    Some(Input::Quit) => break Exit::Quit,
                    Some(Input::Action(action)) => {
                        notice = match session.handle(action) {
                            ViewEffect::Redraw => None,
                            ViewEffect::Message(message) => Some(message),
                            ViewEffect::OpenUrl(url) => match open_link(&url) {
                                Ok(()) => Some("Calendario abierto en el navegador".to_string()),
                                Err(e) => {
                                    warn!(error = %e, "Could not open calendar link");
                                    Some(url)
                                }
                            },
                        };
                    }
                    None if line.trim().is_empty() => {}
                    None => notice = Some(HELP.to_string()),
                }
            }
        }

        draw(renderer, session, notice.as_deref(), out)?;
    };

    Ok(exit)
}

fn draw<S: AudioSink, W: Write>(
    renderer: &Renderer,
    session: &ViewSession<S>,
    notice: Option<&str>,
    out: &mut W,
) -> ClientResult<()> {
    let frame = renderer.render(&session.screen(), notice)?;
    writeln!(out, "{}", frame)?;
    out.flush()?;
    Ok(())
}
