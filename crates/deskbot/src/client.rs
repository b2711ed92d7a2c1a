//! The client loop: read a frame, let the session decide, send the replies.
//!
//! The flow is:
//!   1. Send the opening messages (player info, join or create)
//!   2. Loop: read one frame → `Session::handle` → enqueue replies → flush
//!   3. Stop when the session says so or the connection fails

use deskbot_duel::{PassiveEngineFactory, RawCoreCodec};
use deskbot_session::{Flow, Seat, Session, StopReason};
use deskbot_transport::FramedTransport;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::deck::{load_deck, load_script};
use crate::{ClientConfig, DeskbotError};

/// How a session that didn't fail came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    pub reason: StopReason,
    /// Where we were seated, if we got that far.
    pub seat: Option<Seat>,
}

impl SessionEnd {
    /// `true` when every duel played out; anything else is a refusal.
    pub fn is_clean(&self) -> bool {
        self.reason == StopReason::DuelEnded
    }
}

/// Drives `session` over `transport` until it stops.
///
/// Replies produced by one inbound message are all queued before the flush,
/// so they go out together and in order. A stop still flushes what was
/// queued before returning.
pub async fn run_session<S>(
    transport: &mut FramedTransport<S>,
    session: &mut Session,
) -> Result<SessionEnd, DeskbotError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    for msg in session.opening_messages() {
        transport.enqueue(msg);
    }
    transport.flush().await?;

    let mut replies = Vec::new();
    loop {
        let msg = transport.read_message().await?;
        let flow = session.handle(msg, &mut replies)?;

        for reply in replies.drain(..) {
            transport.enqueue(reply);
        }
        transport.flush().await?;

        if let Flow::Stop(reason) = flow {
            return Ok(SessionEnd {
                reason,
                seat: session.seat(),
            });
        }
    }
}

/// Builds a session from `config`: loads the deck and script it names and
/// wires in the reference codec and engine.
pub async fn build_session(config: &ClientConfig) -> Result<Session, DeskbotError> {
    let mut session = Session::new(
        config.session.clone(),
        Box::new(RawCoreCodec::new()),
        Box::new(PassiveEngineFactory),
    );
    if let Some(path) = &config.deck {
        session = session.with_deck(load_deck(path).await?);
    }
    if let Some(path) = &config.script {
        session = session.with_script(load_script(path).await?);
    }
    Ok(session)
}

/// Connects to the configured server and plays one session to its end.
pub async fn run(config: &ClientConfig) -> Result<SessionEnd, DeskbotError> {
    let mut session = build_session(config).await?;
    let mut transport =
        FramedTransport::connect(&config.addr(), config.transport_config()).await?;

    let end = run_session(&mut transport, &mut session).await?;
    if let Err(e) = transport.shutdown().await {
        tracing::debug!(error = %e, "shutdown failed");
    }
    Ok(end)
}
