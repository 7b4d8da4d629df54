//! Link editor and submission orchestrator
//!
//! One editor holds at most one open session. Submitting walks
//! `Idle → Validating → Normalizing → Transmitting → Idle`; only one
//! submission may be in flight at a time and a second one is rejected, not
//! queued.
//!
//! Every opened session gets a fresh generation number. Closing or reopening
//! the editor bumps it, so a response that arrives for an older generation is
//! discarded and can no longer touch the session or the link list.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::normalizer::normalize;
use super::validator::{Advisory, ValidationErrors, advisories, validate};
use crate::client::{ClientError, LinkTransport};
use crate::draft::{DraftAction, DraftLog};
use crate::errors::{LinkcraftError, Result};
use crate::models::{EditMode, Link, LinkDraft, LinkPayload};

/// Submission progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    Normalizing,
    Transmitting,
}

/// Result of a submission that reached the API
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The API stored the link; the session has been closed
    Saved(Link),
    /// The editor was closed or reopened while the request was in flight
    Discarded,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    /// A submission is already in flight
    InFlight,
    /// No link is open in the editor
    NoSession,
    /// Local validation failed; nothing was sent
    Invalid(ValidationErrors),
    /// The API rejected the link
    Remote { status: u16, message: String },
    /// The request failed before the API answered
    Transport(ClientError),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::InFlight => write!(f, "A submission is already in progress"),
            SubmitError::NoSession => write!(f, "No link is open in the editor"),
            SubmitError::Invalid(errors) => write!(f, "{}", errors),
            SubmitError::Remote { message, .. } => write!(f, "{}", message),
            SubmitError::Transport(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SubmitError {}

impl From<SubmitError> for LinkcraftError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::InFlight | SubmitError::NoSession => {
                LinkcraftError::editor_state(err.to_string())
            }
            SubmitError::Invalid(errors) => LinkcraftError::validation(errors.to_string()),
            SubmitError::Remote { message, .. } => LinkcraftError::remote(message),
            SubmitError::Transport(e) => e.into(),
        }
    }
}

/// An open draft and the mode it was opened in
#[derive(Debug, Clone)]
pub struct EditorSession {
    mode: EditMode,
    log: DraftLog,
}

impl EditorSession {
    pub fn new(mode: EditMode, draft: LinkDraft) -> Self {
        Self {
            mode,
            log: DraftLog::new(draft),
        }
    }

    pub fn create() -> Self {
        Self::new(EditMode::Create, LinkDraft::new())
    }

    /// Edit an existing link; password and alias start blank
    pub fn edit(link: &Link) -> Self {
        Self::new(
            EditMode::edit(link.short_code.clone()),
            LinkDraft::from_link(link),
        )
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn draft(&self) -> &LinkDraft {
        self.log.draft()
    }

    pub fn actions(&self) -> &[DraftAction] {
        self.log.actions()
    }

    /// Apply an action; creation-only actions are dropped while editing.
    /// Returns whether the action was applied.
    pub fn dispatch(&mut self, action: DraftAction) -> bool {
        if self.mode.is_editing() && action.is_creation_only() {
            debug!("Ignoring creation-only action in edit mode: {:?}", action);
            return false;
        }
        self.log.apply(action);
        true
    }
}

#[derive(Debug, Default)]
struct EditorState {
    phase: SubmitPhase,
    generation: u64,
    session: Option<EditorSession>,
    links: Vec<Link>,
}

impl EditorState {
    fn session(&self) -> Result<&EditorSession> {
        self.session
            .as_ref()
            .ok_or_else(|| LinkcraftError::editor_state("No link is open in the editor"))
    }

    /// Start a new generation, detaching any in-flight submission
    fn next_generation(&mut self, session: Option<EditorSession>) {
        self.generation += 1;
        self.phase = SubmitPhase::Idle;
        self.session = session;
    }

    fn upsert_link(&mut self, link: Link) {
        match self
            .links
            .iter_mut()
            .find(|l| l.short_code == link.short_code)
        {
            Some(existing) => *existing = link,
            None => self.links.insert(0, link),
        }
    }
}

/// Resets the phase when a submission ends, including when its future is
/// dropped mid-flight. A newer generation is left alone.
struct PhaseGuard<'a> {
    state: &'a Mutex<EditorState>,
    generation: u64,
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if state.generation == self.generation {
            state.phase = SubmitPhase::Idle;
        }
    }
}

/// Maps a server-reported variant index back to the variant's name
fn remote_message(error: String, variant_index: Option<usize>, payload: &LinkPayload) -> String {
    let variant = variant_index.and_then(|index| {
        payload
            .ab_test
            .as_ref()
            .and_then(|ab| ab.variants.get(index))
    });
    match variant {
        Some(variant) => format!("Variant \"{}\": {}", variant.name, error),
        None => error,
    }
}

pub struct LinkEditor<T: LinkTransport> {
    transport: Arc<T>,
    state: Mutex<EditorState>,
}

impl<T: LinkTransport> LinkEditor<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            state: Mutex::new(EditorState::default()),
        }
    }

    /// Seed the list of known links
    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.state.get_mut().links = links;
        self
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Open a session, replacing (and detaching) any previous one
    pub fn open(&self, session: EditorSession) {
        let mut state = self.state.lock();
        let target = session.mode.short_code().unwrap_or("a new link").to_string();
        state.next_generation(Some(session));
        debug!("Editor opened for {} (generation {})", target, state.generation);
    }

    pub fn open_create(&self) {
        self.open(EditorSession::create());
    }

    pub fn open_edit(&self, link: &Link) {
        self.open(EditorSession::edit(link));
    }

    /// Close the editor. Any in-flight response will be discarded.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.phase == SubmitPhase::Transmitting {
            info!("Editor closed with a submission in flight; its result will be dropped");
        }
        state.next_generation(None);
    }

    pub fn is_open(&self) -> bool {
        self.state.lock().session.is_some()
    }

    pub fn phase(&self) -> SubmitPhase {
        self.state.lock().phase
    }

    pub fn links(&self) -> Vec<Link> {
        self.state.lock().links.clone()
    }

    pub fn mode(&self) -> Result<EditMode> {
        Ok(self.state.lock().session()?.mode.clone())
    }

    pub fn draft(&self) -> Result<LinkDraft> {
        Ok(self.state.lock().session()?.draft().clone())
    }

    pub fn actions(&self) -> Result<Vec<DraftAction>> {
        Ok(self.state.lock().session()?.actions().to_vec())
    }

    /// Returns `false` when the action was ignored (creation-only while editing)
    pub fn dispatch(&self, action: DraftAction) -> Result<bool> {
        let mut state = self.state.lock();
        let session = state
            .session
            .as_mut()
            .ok_or_else(|| LinkcraftError::editor_state("No link is open in the editor"))?;
        Ok(session.dispatch(action))
    }

    pub fn validate(&self) -> Result<ValidationErrors> {
        let state = self.state.lock();
        let session = state.session()?;
        Ok(validate(session.draft(), &session.mode))
    }

    pub fn advisories(&self) -> Result<Vec<Advisory>> {
        Ok(advisories(self.state.lock().session()?.draft()))
    }

    /// The body `submit` would send for the current draft
    pub fn preview_payload(&self) -> Result<LinkPayload> {
        let state = self.state.lock();
        let session = state.session()?;
        Ok(normalize(session.draft(), &session.mode))
    }

    /// Validate, normalize and send the open draft.
    ///
    /// On failure the draft stays as it is so the user can fix it and retry.
    pub async fn submit(&self) -> std::result::Result<SubmitOutcome, SubmitError> {
        let (generation, mode, payload) = {
            let mut state = self.state.lock();
            if state.phase != SubmitPhase::Idle {
                debug!("Submit ignored: already {:?}", state.phase);
                return Err(SubmitError::InFlight);
            }
            let Some(session) = state.session.as_ref() else {
                return Err(SubmitError::NoSession);
            };
            let mode = session.mode.clone();
            let draft = session.draft().clone();

            state.phase = SubmitPhase::Validating;
            let errors = validate(&draft, &mode);
            if !errors.is_empty() {
                state.phase = SubmitPhase::Idle;
                debug!("Submit blocked by {} validation error(s)", errors.len());
                return Err(SubmitError::Invalid(errors));
            }
            for advisory in advisories(&draft) {
                warn!("{}", advisory);
            }

            state.phase = SubmitPhase::Normalizing;
            let payload = normalize(&draft, &mode);

            state.phase = SubmitPhase::Transmitting;
            (state.generation, mode, payload)
        };

        let _guard = PhaseGuard {
            state: &self.state,
            generation,
        };

        let result = match mode.short_code() {
            Some(code) => self.transport.update_link(code, &payload).await,
            None => self.transport.create_link(&payload).await,
        };

        let mut state = self.state.lock();
        if state.generation != generation {
            info!(
                "Dropping {} response for closed editor (generation {})",
                self.transport.name(),
                generation
            );
            return Ok(SubmitOutcome::Discarded);
        }

        match result {
            Ok(link) => {
                info!("Saved link {}", link.short_code);
                state.upsert_link(link.clone());
                state.next_generation(None);
                Ok(SubmitOutcome::Saved(link))
            }
            Err(ClientError::Remote { status, body }) => {
                let message = remote_message(body.error, body.variant_index, &payload);
                warn!("Link API rejected the link ({}): {}", status, message);
                Err(SubmitError::Remote { status, message })
            }
            Err(e) => {
                warn!("Link submission failed: {}", e);
                Err(SubmitError::Transport(e))
            }
        }
    }
}
