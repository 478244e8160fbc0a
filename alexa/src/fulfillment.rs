use tracing::{Dispatch, debug, error, trace, warn};

use crate::category::{Category, HandlerName};
use crate::errors::{DispatchError, FulfillmentError};
use crate::request::{RequestEnvelope, Session};
use crate::response::{Response, ResponseEnvelope};
use crate::skill::Skill;

#[derive(Debug, Clone, Default)]
pub struct Alexa {
    application_id: Option<String>,
    logger: Option<Dispatch>,
}

impl Alexa {
    /// Requests are only handled if they are addressed to `application_id`, when it is `None`
    /// every request is accepted.
    pub fn new(application_id: Option<&str>) -> Self {
        Self {
            application_id: application_id.map(Into::into),
            logger: None,
        }
    }

    /// Log everything that happens while handling a request to `logger` instead of the default
    /// subscriber.
    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Handles a single request, any error is turned into the response of the processing error
    /// handler of the skill. Only if that handler fails as well an error is returned.
    pub fn handle_request<S: Skill + ?Sized>(
        &self,
        skill: &S,
        envelope: RequestEnvelope,
        context: &S::Context,
    ) -> Result<ResponseEnvelope, FulfillmentError> {
        match &self.logger {
            Some(logger) => {
                tracing::dispatcher::with_default(logger, || self.process(skill, &envelope, context))
            }
            None => self.process(skill, &envelope, context),
        }
    }

    fn process<S: Skill + ?Sized>(
        &self,
        skill: &S,
        envelope: &RequestEnvelope,
        context: &S::Context,
    ) -> Result<ResponseEnvelope, FulfillmentError> {
        let request_id = envelope.request.request_id.as_str();
        debug!(request_id, "{envelope:?}");

        let mut session = envelope.session.clone().unwrap_or_default();
        match self.dispatch(skill, envelope, &mut session, context) {
            Ok(response) => {
                trace!(request_id, "Response built");
                Ok(ResponseEnvelope::new(session.attributes, response))
            }
            Err(err) => {
                error!(request_id, "Failed to process request: {err}");

                let response = skill
                    .on_processing_error(envelope, context, &err)
                    .map_err(|source| FulfillmentError::ProcessingError { cause: err, source })?;

                trace!(request_id, "Error handled");

                // Changes made by the handlers before failing are not returned
                let attributes = envelope
                    .session
                    .as_ref()
                    .map(|session| session.attributes.clone())
                    .unwrap_or_default();

                Ok(ResponseEnvelope::new(attributes, response))
            }
        }
    }

    fn dispatch<S: Skill + ?Sized>(
        &self,
        skill: &S,
        envelope: &RequestEnvelope,
        session: &mut Session,
        context: &S::Context,
    ) -> Result<Response, DispatchError> {
        let request = &envelope.request;

        self.authorize(envelope)?;
        trace!("Authorized");

        if session.new {
            skill
                .on_session_started(request, session)
                .map_err(|source| {
                    handler_failed(HandlerName::new(HandlerName::SESSION_STARTED), source)
                })?;
            trace!("Session started");
        }

        let category = Category::classify(request)?;
        let handler = category.handler_name();
        trace!(%handler, "Classified");

        let response = match &category {
            Category::Launch => skill.on_launch(request, session).map(Some),
            Category::SessionEnded => skill.on_session_ended(request, session).map(Some),
            Category::Intent(intent) => skill.on_intent(intent, request, session),
            Category::SystemEvent(event) => skill.on_system_event(event, envelope, context),
        }
        .map_err(|source| handler_failed(handler.clone(), source))?;
        trace!(%handler, "Dispatched");

        match (response, category) {
            (Some(response), _) => Ok(response),
            // Not every system event needs to be handled
            (None, Category::SystemEvent(_)) => {
                warn!(%handler, "No handler found for system event, ignoring");
                Ok(Response::new())
            }
            (None, _) => Err(DispatchError::Unimplemented(handler)),
        }
    }

    fn authorize(&self, envelope: &RequestEnvelope) -> Result<(), DispatchError> {
        let Some(expected) = &self.application_id else {
            return Ok(());
        };

        match envelope.application_id() {
            Some(found) if found == expected => Ok(()),
            found => Err(DispatchError::Unauthorized {
                expected: expected.clone(),
                found: found.map(Into::into),
            }),
        }
    }
}

fn handler_failed(handler: HandlerName, source: anyhow::Error) -> DispatchError {
    error!(%handler, "Handler failed: {source:?}");
    DispatchError::Handler { handler, source }
}
