use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

use super::{
    entities::{CalorieLog, CalorieSummary},
    value_objects::{CalorieLogInput, SummaryRange},
};

#[cfg_attr(test, mockall::automock)]
pub trait CalorieLogRepository: Send + Sync {
    fn create_log(
        &self,
        input: CalorieLogInput,
    ) -> impl Future<Output = Result<CalorieLog, CoreError>> + Send;

    fn fetch_summary(
        &self,
        range: SummaryRange,
    ) -> impl Future<Output = Result<CalorieSummary, CoreError>> + Send;
}

pub trait CalorieService: Send + Sync {
    fn log_calories(
        &self,
        input: CalorieLogInput,
    ) -> impl Future<Output = Result<CalorieLog, CoreError>> + Send;

    fn calorie_summary(
        &self,
        range: SummaryRange,
    ) -> impl Future<Output = Result<CalorieSummary, CoreError>> + Send;
}
