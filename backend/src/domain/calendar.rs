//! Calendar domain logic for the farm dashboard.
//!
//! Day buckets group events by local-date string equality, ignoring the
//! time-of-day component. The UI only handles presentation; all date
//! calculations and event grouping live here.

use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate};
use log::debug;
use shared::{
    CalendarDay, CalendarDayType, CalendarFocusDate, CalendarMonth, DayEvents, TaskEvent,
    WateringEvent,
};
use std::sync::{Arc, Mutex};

use crate::domain::plant_service::PlantService;
use crate::domain::task_service::TaskService;

#[derive(Clone)]
pub struct CalendarService {
    plants: PlantService,
    tasks: TaskService,
    /// Current focus month for calendar navigation. Kept in memory only,
    /// never persisted.
    current_focus_date: Arc<Mutex<CalendarFocusDate>>,
}

impl CalendarService {
    pub fn new(plants: PlantService, tasks: TaskService) -> Self {
        Self {
            plants,
            tasks,
            current_focus_date: Arc::new(Mutex::new(CalendarFocusDate::default())),
        }
    }

    /// Everything scheduled on one calendar day: plants whose next watering
    /// falls on that day (whatever the time of day) and tasks due that day
    /// that are not completed.
    pub fn events_for_day(&self, date: NaiveDate) -> DayEvents {
        let day_str = date.format("%Y-%m-%d").to_string();

        let waterings = self
            .plants
            .list_plants()
            .into_iter()
            .filter(|p| {
                p.next_watering_at
                    .map(|next| next.format("%Y-%m-%d").to_string() == day_str)
                    .unwrap_or(false)
            })
            .map(|p| WateringEvent {
                plant_id: p.id,
                plant_name: p.name,
                field_id: p.field_id,
                status: p.watering_status,
            })
            .collect();

        let tasks = self
            .tasks
            .tasks_for_day(date)
            .into_iter()
            .map(|t| TaskEvent {
                task_id: t.id,
                title: t.title,
                priority: t.priority,
                status: t.status,
            })
            .collect();

        DayEvents { waterings, tasks }
    }

    /// Generate a month grid with per-day event buckets and leading padding
    /// cells so day 1 lands on its weekday column.
    pub fn events_for_month(&self, month: u32, year: u32) -> Result<CalendarMonth> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month: {}. Must be between 1 and 12", month));
        }

        let days_in_month = self.days_in_month(month, year);
        let first_day = self.first_day_of_month(month, year);
        debug!(
            "Generating calendar for {}/{}: {} days, first weekday {}",
            month, year, days_in_month, first_day
        );

        let mut days = Vec::new();
        for _ in 0..first_day {
            days.push(CalendarDay {
                day: 0,
                day_type: CalendarDayType::PaddingBefore,
                events: DayEvents::default(),
            });
        }
        for day in 1..=days_in_month {
            let date = NaiveDate::from_ymd_opt(year as i32, month, day)
                .ok_or_else(|| anyhow!("Invalid date {}-{}-{}", year, month, day))?;
            days.push(CalendarDay {
                day,
                day_type: CalendarDayType::MonthDay,
                events: self.events_for_day(date),
            });
        }

        Ok(CalendarMonth {
            month,
            year,
            days,
            first_day_of_week: first_day,
        })
    }

    /// Number of days in a given month and year.
    pub fn days_in_month(&self, month: u32, year: u32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self, year: u32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Weekday of the 1st of the month (0 = Sunday, 1 = Monday, ...).
    pub fn first_day_of_month(&self, month: u32, year: u32) -> u32 {
        if let Some(date) = NaiveDate::from_ymd_opt(year as i32, month, 1) {
            date.weekday().num_days_from_sunday()
        } else {
            0
        }
    }

    pub fn previous_month(&self, current_month: u32, current_year: u32) -> (u32, u32) {
        if current_month == 1 {
            // Saturate at year 0 rather than underflow.
            (12, current_year.saturating_sub(1))
        } else {
            (current_month - 1, current_year)
        }
    }

    pub fn next_month(&self, current_month: u32, current_year: u32) -> (u32, u32) {
        if current_month == 12 {
            (1, current_year + 1)
        } else {
            (current_month + 1, current_year)
        }
    }

    pub fn get_focus_date(&self) -> CalendarFocusDate {
        self.current_focus_date.lock().unwrap().clone()
    }

    pub fn set_focus_date(&self, month: u32, year: u32) -> Result<CalendarFocusDate> {
        if !(1..=12).contains(&month) {
            return Err(anyhow!("Invalid month: {}. Must be between 1 and 12", month));
        }

        let new_focus_date = CalendarFocusDate { month, year };
        {
            let mut focus_date = self.current_focus_date.lock().unwrap();
            *focus_date = new_focus_date.clone();
        }
        Ok(new_focus_date)
    }

    pub fn navigate_previous_month(&self) -> CalendarFocusDate {
        let current = self.get_focus_date();
        let (month, year) = self.previous_month(current.month, current.year);
        // Cannot fail: previous_month always yields a valid month.
        self.set_focus_date(month, year).unwrap()
    }

    pub fn navigate_next_month(&self) -> CalendarFocusDate {
        let current = self.get_focus_date();
        let (month, year) = self.next_month(current.month, current.year);
        // Cannot fail: next_month always yields a valid month.
        self.set_focus_date(month, year).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::fields::CreateFieldCommand;
    use crate::domain::commands::plants::{
        AddPlantTypeCommand, CreatePlantCommand, UpdatePlantCommand,
    };
    use crate::domain::commands::tasks::CreateTaskCommand;
    use crate::storage::test_utils::MemoryBlobStore;
    use crate::Backend;
    use chrono::NaiveDateTime;
    use shared::{FieldStatus, PlantHealthStatus, TaskPriority};
    use std::sync::Arc;

    fn backend() -> Backend {
        Backend::with_store(Arc::new(MemoryBlobStore::default())).unwrap()
    }

    fn plant_due_at(backend: &Backend, name: &str, next: NaiveDateTime) -> String {
        let field = backend
            .field_service
            .create_field(CreateFieldCommand {
                name: format!("{} field", name),
                area: 100.0,
                location: None,
                soil_type: None,
                notes: None,
                status: FieldStatus::Healthy,
            })
            .unwrap();
        let plant_type = backend
            .plant_service
            .add_plant_type(AddPlantTypeCommand {
                name: format!("{} type", name),
                category: "Vegetable".to_string(),
                watering_frequency_days: 7,
                growth_duration_days: None,
                common_pests: Vec::new(),
                care_instructions: None,
            })
            .unwrap();
        let plant = backend
            .plant_service
            .create_plant(CreatePlantCommand {
                name: name.to_string(),
                type_id: plant_type.id,
                field_id: field.id,
                zone_id: None,
                variety: None,
                quantity: 1,
                planted_at: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                watering_frequency_days: None,
                health_status: PlantHealthStatus::Healthy,
                notes: None,
            })
            .unwrap();
        backend
            .plant_service
            .update_plant(
                &plant.id,
                UpdatePlantCommand {
                    next_watering_at: Some(next),
                    ..Default::default()
                },
            )
            .unwrap();
        plant.id
    }

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_days_in_month() {
        let backend = backend();
        let service = &backend.calendar_service;
        assert_eq!(service.days_in_month(1, 2025), 31);
        assert_eq!(service.days_in_month(4, 2025), 30);
        assert_eq!(service.days_in_month(2, 2025), 28);
        assert_eq!(service.days_in_month(2, 2024), 29);
    }

    #[test]
    fn test_is_leap_year() {
        let backend = backend();
        let service = &backend.calendar_service;
        assert!(!service.is_leap_year(2025));
        assert!(service.is_leap_year(2024));
        assert!(!service.is_leap_year(1900));
        assert!(service.is_leap_year(2000));
    }

    #[test]
    fn test_events_for_day_ignores_time_of_day() {
        let backend = backend();
        let on_day = plant_due_at(&backend, "included", dt(2024, 6, 15, 9));
        plant_due_at(&backend, "excluded", dt(2024, 6, 16, 0));

        let events = backend
            .calendar_service
            .events_for_day(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert_eq!(events.waterings.len(), 1);
        assert_eq!(events.waterings[0].plant_id, on_day);
    }

    #[test]
    fn test_events_for_day_excludes_completed_tasks() {
        let backend = backend();
        let day = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let open = backend
            .task_service
            .create_task(CreateTaskCommand {
                title: "Harvest garlic".to_string(),
                description: None,
                due_date: day,
                due_time: None,
                priority: TaskPriority::High,
                field_id: None,
                plant_id: None,
                recurrence: None,
            })
            .unwrap();
        let done = backend
            .task_service
            .create_task(CreateTaskCommand {
                title: "Mow paths".to_string(),
                description: None,
                due_date: day,
                due_time: None,
                priority: TaskPriority::Low,
                field_id: None,
                plant_id: None,
                recurrence: None,
            })
            .unwrap();
        backend.task_service.complete_task(&done.id).unwrap();

        let events = backend.calendar_service.events_for_day(day);
        assert_eq!(events.tasks.len(), 1);
        assert_eq!(events.tasks[0].task_id, open.id);
    }

    #[test]
    fn test_month_grid_pads_to_first_weekday() {
        let backend = backend();
        plant_due_at(&backend, "due mid-month", dt(2025, 6, 15, 12));

        // June 1st 2025 is a Sunday, so no padding.
        let june = backend.calendar_service.events_for_month(6, 2025).unwrap();
        assert_eq!(june.first_day_of_week, 0);
        assert_eq!(june.days.len(), 30);

        let day15 = june
            .days
            .iter()
            .find(|d| d.day == 15 && d.day_type == CalendarDayType::MonthDay)
            .unwrap();
        assert_eq!(day15.events.waterings.len(), 1);

        // July 1st 2025 is a Tuesday: two padding cells then 31 days.
        let july = backend.calendar_service.events_for_month(7, 2025).unwrap();
        assert_eq!(july.first_day_of_week, 2);
        assert_eq!(july.days.len(), 33);
        assert!(july.days[..2]
            .iter()
            .all(|d| d.day_type == CalendarDayType::PaddingBefore));
    }

    #[test]
    fn test_events_for_month_rejects_invalid_month() {
        let backend = backend();
        assert!(backend.calendar_service.events_for_month(13, 2025).is_err());
    }

    #[test]
    fn test_navigation_rolls_over_years() {
        let backend = backend();
        let service = &backend.calendar_service;
        assert_eq!(service.previous_month(1, 2025), (12, 2024));
        assert_eq!(service.next_month(12, 2025), (1, 2026));

        service.set_focus_date(1, 2025).unwrap();
        let focus = service.navigate_previous_month();
        assert_eq!((focus.month, focus.year), (12, 2024));

        service.set_focus_date(12, 2025).unwrap();
        let focus = service.navigate_next_month();
        assert_eq!((focus.month, focus.year), (1, 2026));
    }

    #[test]
    fn test_navigation_saturates_at_year_zero() {
        let backend = backend();
        let service = &backend.calendar_service;
        assert_eq!(service.previous_month(1, 0), (12, 0));

        service.set_focus_date(1, 0).unwrap();
        let focus = service.navigate_previous_month();
        assert_eq!((focus.month, focus.year), (12, 0));
    }

    #[test]
    fn test_set_focus_date_validates_month() {
        let backend = backend();
        assert!(backend.calendar_service.set_focus_date(0, 2025).is_err());
        assert!(backend.calendar_service.set_focus_date(13, 2025).is_err());
        let focus = backend.calendar_service.set_focus_date(6, 2025).unwrap();
        assert_eq!((focus.month, focus.year), (6, 2025));
        let retrieved = backend.calendar_service.get_focus_date();
        assert_eq!((retrieved.month, retrieved.year), (6, 2025));
    }
}
