use crate::category::IntentKind;
use crate::errors::DispatchError;
use crate::request::{Request, RequestEnvelope, Session, SystemEvent};
use crate::response::Response;

/// The operations a skill provides, one per category of request.
///
/// Intent and system event handlers return `Ok(None)` when the skill has nothing for that
/// request. For intents this is treated as an error, system events are allowed to be ignored.
pub trait Skill {
    /// Caller supplied information about the invocation, passed through to the handlers that
    /// receive the full envelope
    type Context;

    /// Called before any other handler when the platform indicates the session is new.
    fn on_session_started(&self, _request: &Request, _session: &mut Session) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_launch(&self, request: &Request, session: &mut Session) -> anyhow::Result<Response>;

    fn on_intent(
        &self,
        intent: &IntentKind,
        request: &Request,
        session: &mut Session,
    ) -> anyhow::Result<Option<Response>>;

    fn on_session_ended(&self, request: &Request, session: &mut Session)
    -> anyhow::Result<Response>;

    fn on_system_event(
        &self,
        _event: &SystemEvent,
        _envelope: &RequestEnvelope,
        _context: &Self::Context,
    ) -> anyhow::Result<Option<Response>> {
        Ok(None)
    }

    /// Gives the skill a chance to respond gracefully when anything goes wrong while handling
    /// the request, the returned response is sent instead.
    fn on_processing_error(
        &self,
        envelope: &RequestEnvelope,
        context: &Self::Context,
        error: &DispatchError,
    ) -> anyhow::Result<Response>;
}
