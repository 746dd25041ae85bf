//! Unit tests for gf-planner.

use gf_core::{Cell, FleetPlan, GridDims, VehicleKind};

use crate::{
    DEFAULT_STEP_BUDGET, JsonFilePlanner, MockPlanner, PathPlanner, PlannerError,
    PlannerRequest, PlannerResponse, parse_plan,
};

const SAMPLE: &str = r#"{
    "tractors_positions": [[[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [2.0, 0.0]],
                           [[4, 4], [4, 5]]],
    "carts_positions": [[[9.0, 9.0], [8.0, 9.0]]],
    "posiciones_de_obstaculos": [[3.0, 3.0], [5.0, 1.0]]
}"#;

// ── Wire format ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod wire {
    use super::*;

    #[test]
    fn request_uses_service_keys() {
        let req = PlannerRequest::new(GridDims::new(12, 8), 3, 5);
        let value: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(value["x"], 12);
        assert_eq!(value["y"], 8);
        assert_eq!(value["tractores"], 3);
        assert_eq!(value["pasos"], DEFAULT_STEP_BUDGET);
        assert_eq!(value["obstaculos"], 5);
    }

    #[test]
    fn request_validation() {
        assert!(PlannerRequest::new(GridDims::new(10, 10), 2, 5).validate().is_ok());
        let bad = [
            PlannerRequest::new(GridDims::new(0, 10), 2, 0),
            PlannerRequest::new(GridDims::new(10, 10), 0, 0),
            PlannerRequest::new(GridDims::new(2, 2), 1, 4),
        ];
        for req in bad {
            assert!(matches!(req.validate(), Err(PlannerError::InvalidRequest(_))), "{req:?}");
        }
    }

    #[test]
    fn response_converts_tractors_then_carts() {
        let plan = parse_plan(SAMPLE).unwrap();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.routes[0].kind, VehicleKind::Tractor);
        assert_eq!(
            plan.routes[0].path,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 0), Cell::new(2, 0)]
        );
        assert_eq!(plan.routes[1].path, vec![Cell::new(4, 4), Cell::new(4, 5)]);
        assert_eq!(plan.routes[2].kind, VehicleKind::Cart);
        assert!(plan.is_obstacle(Cell::new(5, 1)));
        assert_eq!(plan.obstacles.len(), 2);
    }

    #[test]
    fn missing_optional_lists_default_empty() {
        let plan = parse_plan(r#"{ "tractors_positions": [[[1, 2]]] }"#).unwrap();
        assert_eq!(plan.len(), 1);
        assert!(plan.obstacles.is_empty());
    }

    #[test]
    fn fractional_coordinate_rejected() {
        let body = r#"{ "tractors_positions": [[[0.0, 0.0], [0.5, 1.0]]] }"#;
        match parse_plan(body) {
            Err(PlannerError::NonIntegral { context, x, y }) => {
                assert_eq!(context, "tractor path 0");
                assert_eq!((x, y), (0.5, 1.0));
            }
            other => panic!("expected NonIntegral, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_coordinate_rejected() {
        let body = r#"{ "tractors_positions": [], "posiciones_de_obstaculos": [[1e12, 0]] }"#;
        assert!(matches!(parse_plan(body), Err(PlannerError::NonIntegral { .. })));
    }

    #[test]
    fn malformed_body_is_json_error() {
        assert!(matches!(parse_plan("{ not json"), Err(PlannerError::Json(_))));
        assert!(matches!(parse_plan(r#"{ "carts_positions": [] }"#), Err(PlannerError::Json(_))));
    }

    #[test]
    fn plan_survives_wire_form() {
        let plan = parse_plan(SAMPLE).unwrap();
        let body = PlannerResponse::from_plan(&plan).to_json().unwrap();
        assert_eq!(parse_plan(&body).unwrap(), plan);
    }
}

// ── Planners ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planners {
    use super::*;

    fn request() -> PlannerRequest {
        PlannerRequest::new(GridDims::new(10, 8), 2, 6)
    }

    fn assert_walk_is_legal(plan: &FleetPlan, grid: GridDims) {
        for route in &plan.routes {
            for pair in route.path.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                let step = (a.x - b.x).abs() + (a.y - b.y).abs();
                assert!(step <= 1, "jump from {a} to {b}");
            }
            for &cell in &route.path {
                assert!(grid.contains(cell), "{cell} off the field");
                assert!(!plan.is_obstacle(cell), "{cell} is an obstacle");
            }
        }
    }

    #[test]
    fn mock_plan_shape() {
        let req = request();
        let plan = MockPlanner::new(7).with_max_steps(25).plan(&req).unwrap();
        assert_eq!(plan.count_of(VehicleKind::Tractor), 2);
        assert_eq!(plan.count_of(VehicleKind::Cart), 2);
        assert_eq!(plan.obstacles.len(), 6);
        assert!(plan.routes.iter().all(|r| r.path.len() == 26));
        assert_walk_is_legal(&plan, req.grid());
    }

    #[test]
    fn mock_plan_is_seeded() {
        let req = request();
        let a = MockPlanner::new(11).plan(&req).unwrap();
        let b = MockPlanner::new(11).plan(&req).unwrap();
        let c = MockPlanner::new(12).plan(&req).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn mock_pauses_repeat_cells() {
        let plan = MockPlanner::new(3)
            .with_pause_probability(1.0)
            .plan(&request())
            .unwrap();
        for route in &plan.routes {
            assert!(route.path.iter().all(|&c| c == route.path[0]));
        }
    }

    #[test]
    fn mock_rejects_invalid_request() {
        let req = PlannerRequest::new(GridDims::new(0, 0), 1, 0);
        assert!(MockPlanner::new(1).plan(&req).is_err());
    }

    #[test]
    fn file_planner_replays_response() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let mut planner = JsonFilePlanner::new(&path);
        let plan = planner.plan(&request()).unwrap();
        assert_eq!(plan, parse_plan(SAMPLE).unwrap());
        assert_eq!(planner.path(), path.as_path());
    }

    #[test]
    fn file_planner_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut planner = JsonFilePlanner::new(dir.path().join("absent.json"));
        assert!(matches!(planner.plan(&request()), Err(PlannerError::Io(_))));
    }
}
