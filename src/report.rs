//! The printed result: dates, weekdays, life stage and age, as text or JSON.

use serde::Serialize;

use crate::age::{self, Age, LifeStage};
use crate::calendar::{CalendarDate, Weekday};

pub const BANNER: &str = "=== Intelligent Age Calculator & Life Stage Classifier ===";
pub const FAREWELL: &str = "Thank you!";

const RULE_WIDTH: usize = 45;

/// Everything printed for one date of birth.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub dob: CalendarDate,
    pub dob_day: Weekday,
    pub today: CalendarDate,
    pub current_day: Weekday,
    pub stage: LifeStage,
    pub age: Age,
}

impl Report {
    pub fn new(dob: CalendarDate, today: CalendarDate) -> Self {
        let age = age::compute(dob, today);
        Self {
            dob,
            dob_day: dob.weekday(),
            today,
            current_day: today.weekday(),
            stage: age::classify(age.years),
            age,
        }
    }

    pub fn render_text(&self) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        let mut out = String::new();

        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!(
            "DOB: {}   Day of Birth: {}\n",
            self.dob, self.dob_day
        ));
        out.push_str(&format!(
            "Current Date: {}   Current Day: {}\n",
            self.today, self.current_day
        ));
        out.push_str(&format!("Stage of life: {}\n", self.stage));
        out.push_str(&format!("Age of the User: {}\n", self.age));
        out.push_str(&format!(
            "Age of the user in days: {} (total days)\n",
            self.age.total_days
        ));
        out.push_str(&format!("{rule}\n"));
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
