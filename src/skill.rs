use alexa::category::IntentKind;
use alexa::errors::DispatchError;
use alexa::request::{Request, RequestEnvelope, Session};
use alexa::{Response, Skill};
use tracing::{debug, warn};

/// Answers every request with the same test response, only the spoken request type changes.
/// Used to verify that a deployment of the skill is reachable.
#[derive(Debug, Clone)]
pub struct DeploymentSkill {
    name: String,
}

impl DeploymentSkill {
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    fn test_response(&self, request_type: &str) -> Response {
        Response::speechlet(
            "Test Response",
            "Test card output",
            &format!(
                "Welcome to the {} for request type {request_type}. It seems to have worked",
                self.name
            ),
            &format!("Reprompt text for the {}", self.name),
            true,
        )
    }
}

impl Skill for DeploymentSkill {
    type Context = ();

    fn on_session_started(&self, _request: &Request, session: &mut Session) -> anyhow::Result<()> {
        debug!(session_id = %session.session_id, "Session started");
        Ok(())
    }

    fn on_launch(&self, _request: &Request, _session: &mut Session) -> anyhow::Result<Response> {
        Ok(self.test_response("on launch"))
    }

    fn on_intent(
        &self,
        intent: &IntentKind,
        _request: &Request,
        _session: &mut Session,
    ) -> anyhow::Result<Option<Response>> {
        debug!(handler = %intent.handler_name(), "Intent received");
        Ok(Some(self.test_response("on intent")))
    }

    fn on_session_ended(&self, request: &Request, _session: &mut Session) -> anyhow::Result<Response> {
        if let Some(error) = &request.error {
            warn!(
                error_type = %error.error_type,
                message = %error.message,
                "Session ended because of an error"
            );
        }

        Ok(self.test_response("on session end"))
    }

    fn on_processing_error(
        &self,
        _envelope: &RequestEnvelope,
        _context: &Self::Context,
        _error: &DispatchError,
    ) -> anyhow::Result<Response> {
        Ok(self.test_response("on processing error"))
    }
}
