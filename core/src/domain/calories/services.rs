use tracing::{info, instrument};

use crate::domain::{
    calories::{
        entities::{CalorieLog, CalorieSummary},
        ports::{CalorieLogRepository, CalorieService},
        value_objects::{CalorieLogInput, SummaryRange},
    },
    common::{entities::app_errors::CoreError, ports::Clock, services::Service},
    ingredient::ports::IngredientRepository,
    preferences::ports::PreferenceRepository,
    recipe::ports::{RecipeGenerator, SavedRecipeRepository},
    session::ports::AuthGateway,
};

impl<A, I, RG, SR, P, CL, C> CalorieService for Service<A, I, RG, SR, P, CL, C>
where
    A: AuthGateway,
    I: IngredientRepository,
    RG: RecipeGenerator,
    SR: SavedRecipeRepository,
    P: PreferenceRepository,
    CL: CalorieLogRepository,
    C: Clock,
{
    #[instrument(skip(self))]
    async fn log_calories(&self, input: CalorieLogInput) -> Result<CalorieLog, CoreError> {
        input.validate()?;
        let log = self.calorie_log_repository.create_log(input).await?;
        info!(date = %log.date, calories = log.calories, "Calories logged");
        Ok(log)
    }

    #[instrument(skip(self))]
    async fn calorie_summary(&self, range: SummaryRange) -> Result<CalorieSummary, CoreError> {
        range.validate()?;
        self.calorie_log_repository.fetch_summary(range).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::common::testing::{Mocks, harness, ready};

    #[tokio::test]
    async fn test_non_positive_calories_rejected() {
        let h = harness(Mocks::default());
        let input = CalorieLogInput {
            calories: 0.0,
            date: None,
            meal_type: None,
            note: None,
        };
        assert!(matches!(
            h.service.log_calories(input).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let h = harness(Mocks::default());
        let range = SummaryRange {
            start: NaiveDate::from_ymd_opt(2025, 6, 7),
            end: NaiveDate::from_ymd_opt(2025, 6, 1),
        };
        assert!(matches!(
            h.service.calorie_summary(range).await,
            Err(CoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_log_then_summary() {
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut mocks = Mocks::default();
        mocks
            .calories
            .expect_create_log()
            .withf(|input| input.calories == 650.0)
            .times(1)
            .returning(move |input| {
                ready(Ok(CalorieLog {
                    id: Some("c1".to_string()),
                    date: input.date.unwrap_or(day),
                    calories: input.calories,
                    meal_type: input.meal_type.unwrap_or_default(),
                    note: input.note.unwrap_or_default(),
                }))
            });
        mocks
            .calories
            .expect_fetch_summary()
            .withf(move |range| range.end == Some(day))
            .times(1)
            .returning(move |_| {
                ready(Ok(CalorieSummary {
                    start_date: day,
                    end_date: day,
                    total_calories: 650.0,
                    daily_totals: Vec::new(),
                    entries: Vec::new(),
                }))
            });
        let h = harness(mocks);

        let log = h
            .service
            .log_calories(CalorieLogInput {
                calories: 650.0,
                date: Some(day),
                meal_type: Some("Lunch".to_string()),
                note: None,
            })
            .await
            .unwrap();
        assert_eq!(log.date, day);
        assert_eq!(log.meal_type, "Lunch");

        let summary = h
            .service
            .calorie_summary(SummaryRange::last_week_ending(day))
            .await
            .unwrap();
        assert_eq!(summary.daily_average(), 650.0);
    }
}
