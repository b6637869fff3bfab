use crate::domain::{
    food_analysis::{ports::FoodAnalysisService, value_objects::AnalyzeFoodInput},
    history::entities::AnalysisHistoryEntry,
    session::{entities::Session, errors::SessionError},
};

impl Session {
    /// Analyzes the current image and records the result in history.
    ///
    /// Nothing is recorded when the service fails. The `&mut` borrow keeps a
    /// second analysis from starting while one is in flight.
    pub async fn analyze<S>(&mut self, service: &S) -> Result<&AnalysisHistoryEntry, SessionError>
    where
        S: FoodAnalysisService,
    {
        let current = self
            .current_image
            .as_ref()
            .ok_or(SessionError::NoImageSelected)?;
        let image = current.input.clone().ok_or(SessionError::NoImageSelected)?;
        let image_ref = current.image_ref.clone();

        let analysis = service
            .analyze_food(AnalyzeFoodInput::new(image))
            .await
            .inspect_err(|e| tracing::error!(image_ref = %image_ref, "food analysis failed: {}", e))?;

        self.current_analysis = Some(analysis.clone());

        let entry = AnalysisHistoryEntry::new(image_ref, analysis);
        let id = entry.id;
        self.history.record(entry);
        tracing::info!(%id, history_len = self.history.len(), "analysis recorded");

        // just recorded, so it sits at the front
        Ok(&self.history.list()[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_analysis::{
        entities::AnalysisError,
        ports::MockFoodAnalysisService,
        services::{OfflineFoodAnalysisService, demo_analysis},
        value_objects::{ImageInput, ImageMimeType},
    };

    fn image() -> ImageInput {
        ImageInput::new(vec![0xffu8, 0xd8, 0xff], ImageMimeType::Jpeg).unwrap()
    }

    #[tokio::test]
    async fn analyze_without_image_fails() {
        let mut session = Session::new();
        let result = session.analyze(&OfflineFoodAnalysisService::new()).await;
        assert_eq!(result.unwrap_err(), SessionError::NoImageSelected);
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn analyze_records_result_in_history() {
        let mut session = Session::new();
        session.select_image("lunch.jpg", image());

        let entry = session
            .analyze(&OfflineFoodAnalysisService::new())
            .await
            .unwrap()
            .clone();

        assert_eq!(entry.image_ref, "lunch.jpg");
        assert_eq!(entry.analysis, demo_analysis());
        assert_eq!(session.current_analysis(), Some(&demo_analysis()));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().select(entry.id), Some(&entry));
    }

    #[tokio::test]
    async fn failed_analysis_records_nothing() {
        let mut service = MockFoodAnalysisService::new();
        service
            .expect_analyze_food()
            .times(1)
            .returning(|_| Box::pin(async { Err(AnalysisError::EmptyResponse) }));

        let mut session = Session::new();
        session.select_image("lunch.jpg", image());

        let result = session.analyze(&service).await;
        assert_eq!(
            result.unwrap_err(),
            SessionError::Analysis(AnalysisError::EmptyResponse)
        );
        assert!(session.history().is_empty());
        assert!(session.current_analysis().is_none());
        assert_eq!(session.current_image_ref(), Some("lunch.jpg"));
    }

    #[tokio::test]
    async fn restored_history_image_cannot_be_reanalyzed() {
        let mut session = Session::new();
        session.select_image("lunch.jpg", image());
        let id = session
            .analyze(&OfflineFoodAnalysisService::new())
            .await
            .unwrap()
            .id;

        session.clear();
        session.select_history(id).unwrap();

        let result = session.analyze(&OfflineFoodAnalysisService::new()).await;
        assert_eq!(result.unwrap_err(), SessionError::NoImageSelected);
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn repeated_analyses_stay_bounded() {
        let service = OfflineFoodAnalysisService::new();
        let mut session = Session::new();
        session.select_image("lunch.jpg", image());

        for _ in 0..12 {
            session.analyze(&service).await.unwrap();
        }

        assert_eq!(session.history().len(), 10);
    }
}
