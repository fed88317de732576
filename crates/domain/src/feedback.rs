use crate::{ReadError, Session, UpdateError, WorkoutID};

#[allow(async_fn_in_trait)]
pub trait FeedbackService: Send + Sync + 'static {
    async fn write_feedback(
        &self,
        session: &Session,
        workout_id: WorkoutID,
        comment: String,
    ) -> Result<CoachFeedback, UpdateError>;
    async fn acknowledge_feedback(
        &self,
        session: &Session,
        workout_id: WorkoutID,
    ) -> Result<CoachFeedback, UpdateError>;
    async fn get_unread_feedback(
        &self,
        session: &Session,
    ) -> Result<Vec<(WorkoutID, CoachFeedback)>, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait FeedbackRepository {
    async fn update_feedback(
        &self,
        workout_id: WorkoutID,
        feedback: Option<CoachFeedback>,
    ) -> Result<(), UpdateError>;
}

/// Workout level note from coach to athlete. Stays unread until the
/// athlete acknowledges it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachFeedback {
    pub comment: String,
    pub unread: bool,
}

impl CoachFeedback {
    #[must_use]
    pub fn new(comment: String) -> Self {
        Self {
            comment,
            unread: true,
        }
    }

    #[must_use]
    pub fn acknowledged(&self) -> Self {
        Self {
            comment: self.comment.clone(),
            unread: false,
        }
    }
}
