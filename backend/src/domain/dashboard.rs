//! Dashboard aggregations and the notification surface.
//!
//! Everything here is a read-only query recomputed on every call. The
//! collections are small and consistency matters more than speed, so there
//! is deliberately no caching layer.

use chrono::{Local, NaiveDate};
use shared::{ActivityItem, DashboardStats, NotificationsSummary, PlantHealthStatus, UrgentWatering, WateringStatus};

use crate::domain::activity_service::ActivityService;
use crate::domain::field_service::FieldService;
use crate::domain::models::Plant;
use crate::domain::plant_service::PlantService;
use crate::domain::task_service::TaskService;

/// Cap on urgent plants shown in the notification dropdown.
const NOTIFICATION_PLANT_CAP: usize = 5;
/// Cap on recent activity entries shown in the notification dropdown.
const NOTIFICATION_ACTIVITY_CAP: usize = 5;

#[derive(Clone)]
pub struct DashboardService {
    fields: FieldService,
    plants: PlantService,
    tasks: TaskService,
    activity: ActivityService,
}

impl DashboardService {
    pub fn new(
        fields: FieldService,
        plants: PlantService,
        tasks: TaskService,
        activity: ActivityService,
    ) -> Self {
        Self {
            fields,
            plants,
            tasks,
            activity,
        }
    }

    /// Plants that need water, most urgent first. The sort is stable, so
    /// plants in the same bucket keep their collection order.
    pub fn plants_needing_water(&self) -> Vec<Plant> {
        let mut plants: Vec<Plant> = self
            .plants
            .list_plants()
            .into_iter()
            .filter(|p| p.watering_status != WateringStatus::Watered)
            .collect();
        plants.sort_by_key(|p| p.watering_status.urgency_rank());
        plants
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        self.dashboard_stats_at(Local::now().date_naive())
    }

    /// `dashboard_stats` with an explicit "today" for the task counts.
    pub fn dashboard_stats_at(&self, today: NaiveDate) -> DashboardStats {
        let plants = self.plants.list_plants();

        DashboardStats {
            total_fields: self.fields.field_count(),
            total_plants: plants.iter().map(|p| p.quantity).sum(),
            plants_needing_water: plants
                .iter()
                .filter(|p| p.watering_status != WateringStatus::Watered)
                .count(),
            overdue_waterings: plants
                .iter()
                .filter(|p| p.watering_status == WateringStatus::Overdue)
                .count(),
            critical_waterings: plants
                .iter()
                .filter(|p| p.watering_status == WateringStatus::Critical)
                .count(),
            problem_plants: plants
                .iter()
                .filter(|p| {
                    matches!(
                        p.health_status,
                        PlantHealthStatus::Sick | PlantHealthStatus::Observation
                    )
                })
                .count(),
            tasks_today: self.tasks.tasks_for_day(today).len(),
            tasks_pending: self.tasks.pending_tasks().len(),
        }
    }

    /// Urgent waterings plus recent activity. The badge counts urgent
    /// plants only; activity entries are informational.
    pub fn notifications(&self) -> NotificationsSummary {
        let mut urgent: Vec<Plant> = self
            .plants
            .list_plants()
            .into_iter()
            .filter(|p| p.watering_status.is_urgent())
            .collect();
        urgent.sort_by_key(|p| p.watering_status.urgency_rank());

        let badge_count = urgent.len();
        urgent.truncate(NOTIFICATION_PLANT_CAP);

        let recent_activity = self
            .activity
            .recent(NOTIFICATION_ACTIVITY_CAP)
            .into_iter()
            .map(|entry| ActivityItem {
                id: entry.id,
                activity_type: entry.activity_type,
                action: entry.action,
                description: entry.description,
                timestamp: entry.timestamp.format("%Y-%m-%dT%H:%M:%S").to_string(),
            })
            .collect();

        NotificationsSummary {
            urgent: urgent
                .into_iter()
                .map(|p| UrgentWatering {
                    plant_id: p.id,
                    plant_name: p.name,
                    field_id: p.field_id,
                    status: p.watering_status,
                })
                .collect(),
            recent_activity,
            badge_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::plants::{CreatePlantCommand, UpdatePlantCommand, WaterPlantCommand};
    use crate::domain::commands::tasks::CreateTaskCommand;
    use crate::storage::test_utils::MemoryBlobStore;
    use crate::Backend;
    use chrono::{Duration, Local, NaiveDate};
    use shared::{PlantHealthStatus, TaskPriority};
    use std::sync::Arc;

    fn backend() -> Backend {
        let backend = Backend::with_store(Arc::new(MemoryBlobStore::default())).unwrap();
        backend
            .field_service
            .create_field(crate::domain::commands::fields::CreateFieldCommand {
                name: "North Field".to_string(),
                area: 1200.0,
                location: None,
                soil_type: None,
                notes: None,
                status: shared::FieldStatus::Healthy,
            })
            .unwrap();
        backend
            .plant_service
            .add_plant_type(crate::domain::commands::plants::AddPlantTypeCommand {
                name: "Tomato".to_string(),
                category: "Vegetable".to_string(),
                watering_frequency_days: 7,
                growth_duration_days: None,
                common_pests: Vec::new(),
                care_instructions: None,
            })
            .unwrap();
        backend
    }

    fn plant(backend: &Backend, name: &str, quantity: u32) -> String {
        let field_id = backend.field_service.list_fields()[0].id.clone();
        let type_id = backend.plant_service.list_plant_types()[0].id.clone();
        backend
            .plant_service
            .create_plant(CreatePlantCommand {
                name: name.to_string(),
                type_id,
                field_id,
                zone_id: None,
                variety: None,
                quantity,
                planted_at: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                watering_frequency_days: None,
                health_status: PlantHealthStatus::Healthy,
                notes: None,
            })
            .unwrap()
            .id
    }

    /// Set a plant's last watering N days in the past, which recomputes its
    /// status against the real clock.
    fn watered_days_ago(backend: &Backend, id: &str, days: i64) {
        backend
            .plant_service
            .update_plant(
                id,
                UpdatePlantCommand {
                    last_watered_at: Some(Local::now().naive_local() - Duration::days(days)),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn test_plants_needing_water_excludes_watered_and_sorts_by_urgency() {
        let backend = backend();
        let due_soon = plant(&backend, "due soon", 1);
        let critical = plant(&backend, "critical", 1); // never watered
        let overdue = plant(&backend, "overdue", 1);
        let watered = plant(&backend, "watered", 1);

        watered_days_ago(&backend, &due_soon, 6); // 1 day left
        watered_days_ago(&backend, &overdue, 8); // 1 day late
        watered_days_ago(&backend, &watered, 1); // 6 days left

        let needing = backend.dashboard_service.plants_needing_water();
        let names: Vec<&str> = needing.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["critical", "overdue", "due soon"]);
        assert!(!needing.iter().any(|p| p.id == watered));

        // No DueSoon entry before an Overdue or Critical one.
        let ranks: Vec<u8> = needing
            .iter()
            .map(|p| p.watering_status.urgency_rank())
            .collect();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
    }

    #[test]
    fn test_dashboard_stats_counts_quantities_not_records() {
        let backend = backend();
        let a = plant(&backend, "tomatoes", 12);
        let b = plant(&backend, "basil", 3);
        watered_days_ago(&backend, &a, 1);
        backend
            .plant_service
            .update_plant(
                &b,
                UpdatePlantCommand {
                    health_status: Some(PlantHealthStatus::Observation),
                    ..Default::default()
                },
            )
            .unwrap();

        let today = Local::now().date_naive();
        backend
            .task_service
            .create_task(CreateTaskCommand {
                title: "Weed".to_string(),
                description: None,
                due_date: today,
                due_time: None,
                priority: TaskPriority::Low,
                field_id: None,
                plant_id: None,
                recurrence: None,
            })
            .unwrap();

        let stats = backend.dashboard_service.dashboard_stats_at(today);
        assert_eq!(stats.total_fields, 1);
        assert_eq!(stats.total_plants, 15);
        assert_eq!(stats.plants_needing_water, 1); // basil, never watered
        assert_eq!(stats.critical_waterings, 1);
        assert_eq!(stats.overdue_waterings, 0);
        assert_eq!(stats.problem_plants, 1);
        assert_eq!(stats.tasks_today, 1);
        assert_eq!(stats.tasks_pending, 1);
    }

    #[test]
    fn test_notifications_cap_urgent_at_five_but_badge_counts_all() {
        let backend = backend();
        for i in 0..7 {
            // Never watered, so all seven are Critical.
            plant(&backend, &format!("plant {}", i), 1);
        }

        let summary = backend.dashboard_service.notifications();
        assert_eq!(summary.urgent.len(), 5);
        assert_eq!(summary.badge_count, 7);
        // Ties keep collection order.
        assert_eq!(summary.urgent[0].plant_name, "plant 0");
    }

    #[test]
    fn test_notifications_exclude_due_soon_and_include_recent_activity() {
        let backend = backend();
        let due_soon = plant(&backend, "due soon", 1);
        watered_days_ago(&backend, &due_soon, 6);
        let overdue = plant(&backend, "late", 1);
        watered_days_ago(&backend, &overdue, 9);

        let summary = backend.dashboard_service.notifications();
        assert_eq!(summary.badge_count, 1);
        assert_eq!(summary.urgent[0].plant_id, overdue);
        // Creates and updates above produced feed entries.
        assert!(!summary.recent_activity.is_empty());
        assert!(summary.recent_activity.len() <= 5);
    }

    #[test]
    fn test_watering_clears_the_badge() {
        let backend = backend();
        let id = plant(&backend, "thirsty", 1);
        assert_eq!(backend.dashboard_service.notifications().badge_count, 1);

        backend
            .plant_service
            .water_plant(&id, WaterPlantCommand::default())
            .unwrap();
        assert_eq!(backend.dashboard_service.notifications().badge_count, 0);
    }
}
