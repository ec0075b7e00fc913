use crate::audit::{AuditCategory, AuditContext, AuditEvent, AuditOutcome, AuditSink};
use crate::config::DialogueConfig;
use crate::dialogue::extraction::TagExtraction;
use crate::dialogue::intent::{Intent, TriggerWords};
use crate::dialogue::messages;
use crate::dialogue::states::{
    DialogueEvent, DialogueReply, DialogueTurn, StartReply, TransitionOutcome,
};
use crate::domain::category::Category;
use crate::domain::session::{Role, Session, Stage};
use crate::errors::DomainError;
use crate::recommendation;

/// Drives one session through category-by-category preference collection.
#[derive(Clone, Debug, Default)]
pub struct DialogueEngine {
    triggers: TriggerWords,
}

impl DialogueEngine {
    pub fn new(triggers: TriggerWords) -> Self {
        Self { triggers }
    }

    pub fn from_config(config: &DialogueConfig) -> Self {
        Self::new(TriggerWords::from_config(config))
    }

    pub fn triggers(&self) -> &TriggerWords {
        &self.triggers
    }

    pub fn start(
        &self,
        people_count: u32,
        categories: Vec<Category>,
    ) -> Result<(Session, StartReply), DomainError> {
        let mut session = Session::start(people_count, categories)?;
        let message = messages::first_message(people_count, &session.selected_categories);
        session.record(Role::Assistant, message.clone());

        let reply = StartReply {
            session_id: session.id.clone(),
            message,
            stage: session.stage,
            progress: session.progress(),
        };
        Ok((session, reply))
    }

    /// Applies one inbound chat message to `session`.
    pub async fn handle(
        &self,
        session: &mut Session,
        message: &str,
        extractor: &dyn TagExtraction,
    ) -> DialogueTurn {
        let from = session.stage;
        if from == Stage::Completed {
            return finished_turn();
        }

        session.record(Role::User, message);
        let (reply, event) = match session.stage {
            Stage::ModificationMode => self.pick_category(session, message),
            _ if session.waiting_for_user_action => self.button_action(session, message),
            _ => self.free_text(session, message, extractor).await,
        };
        session.record(Role::Assistant, reply.message.clone());

        DialogueTurn { transition: TransitionOutcome { from, to: session.stage, event }, reply }
    }

    pub async fn handle_with_audit<S>(
        &self,
        session: &mut Session,
        message: &str,
        extractor: &dyn TagExtraction,
        sink: &S,
        audit: &AuditContext,
    ) -> DialogueTurn
    where
        S: AuditSink + ?Sized,
    {
        let turn = self.handle(session, message, extractor).await;
        emit_transition(sink, audit, session, &turn.transition);
        turn
    }

    /// Older single-purpose confirmation path: an affirmative message prints
    /// results regardless of the current stage, anything else re-asks.
    pub fn confirm_results(&self, session: &mut Session, message: &str) -> DialogueTurn {
        let from = session.stage;
        if from == Stage::Completed {
            return finished_turn();
        }

        session.record(Role::User, message);
        let (reply, event) = match self.triggers.classify(message) {
            Intent::Affirmative => (complete(session), DialogueEvent::ResultsRequested),
            _ => (
                DialogueReply::new(messages::UNCLEAR_RESULT_RESPONSE, session.stage)
                    .with_buttons(messages::RESULT_QUESTION),
                DialogueEvent::ResultsDeclined,
            ),
        };
        session.record(Role::Assistant, reply.message.clone());

        DialogueTurn { transition: TransitionOutcome { from, to: session.stage, event }, reply }
    }

    pub fn confirm_results_with_audit<S>(
        &self,
        session: &mut Session,
        message: &str,
        sink: &S,
        audit: &AuditContext,
    ) -> DialogueTurn
    where
        S: AuditSink + ?Sized,
    {
        let turn = self.confirm_results(session, message);
        emit_transition(sink, audit, session, &turn.transition);
        turn
    }

    /// Lets the user revisit an earlier category. No chat input leads here.
    pub fn enter_modification_mode(&self, session: &mut Session) -> DialogueTurn {
        let from = session.stage;
        if from == Stage::Completed {
            return finished_turn();
        }

        session.stage = Stage::ModificationMode;
        session.waiting_for_user_action = false;
        let reply = DialogueReply::new(messages::MODIFICATION_MODE, Stage::ModificationMode)
            .with_available_categories(session.selected_categories.clone());
        session.record(Role::Assistant, reply.message.clone());

        DialogueTurn {
            transition: TransitionOutcome {
                from,
                to: session.stage,
                event: DialogueEvent::ModificationRequested,
            },
            reply,
        }
    }

    async fn free_text(
        &self,
        session: &mut Session,
        message: &str,
        extractor: &dyn TagExtraction,
    ) -> (DialogueReply, DialogueEvent) {
        session.last_user_message = message.to_string();

        let Some(category) = session.current_category() else {
            return (await_results(session), DialogueEvent::FreeTextReceived);
        };

        let extracted = extractor.extract(message, category, session.people_count).await;
        let tags = session.merge_tags(category, extracted);
        session.pending_tags = tags.clone();
        session.waiting_for_user_action = true;

        tracing::debug!(
            event_name = "dialogue.tags_collected",
            session_id = %session.id,
            category = %category,
            tag_count = tags.len(),
            "collected tags for category"
        );

        let reply = DialogueReply::new(messages::collected_tags(&tags), session.stage)
            .with_tags(tags)
            .with_progress(session.progress())
            .with_buttons(messages::YES_NO_QUESTION)
            .with_current_category(category);
        (reply, DialogueEvent::FreeTextReceived)
    }

    fn button_action(&self, session: &mut Session, message: &str) -> (DialogueReply, DialogueEvent) {
        let intent = self.triggers.classify(message);

        if session.stage == Stage::ConfirmingResults {
            return match intent {
                Intent::Affirmative => (complete(session), DialogueEvent::ResultsRequested),
                _ => (
                    DialogueReply::new(messages::UNCLEAR_RESULT_RESPONSE, session.stage)
                        .with_buttons(messages::RESULT_QUESTION),
                    DialogueEvent::ResultsDeclined,
                ),
            };
        }

        match intent {
            Intent::Affirmative => (advance(session), DialogueEvent::ContinueChosen),
            Intent::More => (add_more(session), DialogueEvent::MoreChosen),
            Intent::Ambiguous | Intent::Unrecognized => (
                DialogueReply::new(messages::UNCLEAR_RESPONSE, session.stage)
                    .with_buttons(messages::YES_NO_QUESTION),
                DialogueEvent::UnclearAction,
            ),
        }
    }

    fn pick_category(&self, session: &mut Session, message: &str) -> (DialogueReply, DialogueEvent) {
        let picked = session
            .selected_categories
            .iter()
            .position(|category| category.is_mentioned_in(message));

        match picked {
            Some(index) => {
                let category = session.selected_categories[index];
                session.current_category_index = index;
                session.stage = Stage::CollectingDetails;
                session.waiting_for_user_action = false;
                (
                    DialogueReply::new(messages::add_more(category), session.stage)
                        .with_current_category(category),
                    DialogueEvent::CategoryPicked,
                )
            }
            None => (
                DialogueReply::new(messages::MODIFICATION_UNMATCHED, session.stage)
                    .with_available_categories(session.selected_categories.clone()),
                DialogueEvent::CategoryNotNamed,
            ),
        }
    }
}

fn finished_turn() -> DialogueTurn {
    DialogueTurn {
        reply: DialogueReply::new(messages::CONVERSATION_FINISHED, Stage::Completed),
        transition: TransitionOutcome {
            from: Stage::Completed,
            to: Stage::Completed,
            event: DialogueEvent::AlreadyCompleted,
        },
    }
}

fn advance(session: &mut Session) -> DialogueReply {
    session.waiting_for_user_action = false;
    if session.categories_exhausted() {
        return await_results(session);
    }

    session.current_category_index += 1;
    match session.current_category() {
        Some(next) => DialogueReply::new(messages::next_category(next), session.stage)
            .with_progress(session.progress())
            .with_current_category(next),
        None => await_results(session),
    }
}

fn add_more(session: &mut Session) -> DialogueReply {
    session.waiting_for_user_action = false;
    match session.current_category() {
        Some(category) => DialogueReply::new(messages::add_more(category), session.stage)
            .with_current_category(category),
        None => await_results(session),
    }
}

fn await_results(session: &mut Session) -> DialogueReply {
    session.stage = Stage::ConfirmingResults;
    session.waiting_for_user_action = true;
    DialogueReply::new(messages::ALL_COMPLETED, Stage::ConfirmingResults)
        .with_buttons(messages::RESULT_QUESTION)
        .with_available_categories(session.selected_categories.clone())
}

fn complete(session: &mut Session) -> DialogueReply {
    let recommendations =
        recommendation::assemble(&session.selected_categories, &session.collected_tags);
    session.stage = Stage::Completed;
    session.waiting_for_user_action = false;

    tracing::info!(
        event_name = "dialogue.recommendations_assembled",
        session_id = %session.id,
        categories = recommendations.len(),
        recommendations = %recommendations.to_text(),
        "assembled recommendations"
    );

    DialogueReply::new(messages::FINAL_RESULT, Stage::Completed)
        .with_recommendations(recommendations)
}

fn emit_transition<S>(
    sink: &S,
    audit: &AuditContext,
    session: &Session,
    transition: &TransitionOutcome,
) where
    S: AuditSink + ?Sized,
{
    let context = AuditContext {
        session_id: Some(session.id.clone()),
        correlation_id: audit.correlation_id.clone(),
        actor: audit.actor.clone(),
    };
    sink.emit(
        AuditEvent::new(
            &context,
            "dialogue.transition_applied",
            AuditCategory::Dialogue,
            AuditOutcome::Success,
        )
        .with_metadata("from", transition.from.as_str())
        .with_metadata("to", transition.to.as_str())
        .with_metadata("event", transition.event.as_str())
        .with_metadata("turn", session.conversation_history.len().to_string()),
    );
}
