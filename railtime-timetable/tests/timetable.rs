use std::fs;

use approx::assert_relative_eq;
use railtime_core::units::in_kilogram_per_meter;
use railtime_kinematics::{KinematicsError, RouteSegment, RouteTimingSolver};
use railtime_timetable::{Consist, Route, Timetable, TimetableError, output_path};
use uom::si::{
    f64::Time,
    length::{inch, mile},
    mass::pound,
    power::horsepower,
    time::{hour, minute, second},
    velocity::mile_per_hour,
};

const CONSIST: &str = r#"{
    "LeadingCoefDrag": 0.8,
    "PowerUnits": [
        { "Mass": 290000, "Height": 187.5, "Width": 123,
          "TractionPower": 3900, "TractionForce": 50000 }
    ],
    "TrailerCars": [
        { "Mass": 185000, "Height": 170, "Width": 120 },
        { "Mass": 185000, "Height": 170, "Width": 120 },
        { "Mass": 185000, "Height": 170, "Width": 120 },
        { "Mass": 185000, "Height": 170, "Width": 120 }
    ]
}"#;

const ROUTE: &str = "\
station,track speed (mph),dist (mi)
Union,0,0
Riverside,79,6.2
Oakdale,110,18.4
Harbor,90,11.0
";

fn consist() -> Consist {
    Consist::from_reader(CONSIST.as_bytes()).unwrap()
}

#[test]
fn consist_aggregates_units() {
    let consist = consist();

    assert_relative_eq!(consist.total_mass().get::<pound>(), 1_030_000.0, max_relative = 1e-12);
    assert_relative_eq!(consist.total_power().get::<horsepower>(), 3900.0, max_relative = 1e-12);

    let (height, width) = consist.max_cross_section();
    assert_relative_eq!(height.get::<inch>(), 187.5, max_relative = 1e-12);
    assert_relative_eq!(width.get::<inch>(), 123.0, max_relative = 1e-12);

    let spec = consist.performance().unwrap();
    assert_relative_eq!(spec.mass().get::<pound>(), 1_030_000.0, max_relative = 1e-12);
    assert!(in_kilogram_per_meter(spec.drag()) > 0.0);
}

#[test]
fn generates_timetable_in_route_order() {
    let spec = consist().performance().unwrap();
    let solver = RouteTimingSolver::new(&spec);
    let route = Route::from_reader(ROUTE.as_bytes()).unwrap();
    let dwell = Time::new::<second>(120.0);

    let timetable = Timetable::generate(&solver, &route, dwell).unwrap();
    let rows = timetable.rows();
    assert_eq!(rows.len(), 4);

    assert_eq!(&rows[0].record[0], "Union");
    assert_eq!(rows[0].time.get::<second>(), 0.0);
    assert_eq!(rows[0].average_speed.get::<mile_per_hour>(), 0.0);
    assert!(rows[0].cruise_speed.is_none());

    for (row, stop) in rows.iter().zip(route.stops()).skip(1) {
        assert_eq!(row.record, stop.record);

        let segment = RouteSegment::new(stop.distance, stop.track_speed, dwell).unwrap();
        let expected = solver.stop_to_stop_time(&segment).unwrap();
        assert_eq!(row.time, expected.total_time);
        assert_relative_eq!(
            row.average_speed.get::<mile_per_hour>(),
            stop.distance.get::<mile>() / expected.total_time.get::<hour>(),
            max_relative = 1e-9
        );
        assert!(row.cruise_speed.unwrap() <= stop.track_speed);
    }

    let total: f64 = rows.iter().map(|row| row.time.get::<minute>()).sum();
    assert_relative_eq!(timetable.total_time().get::<minute>(), total, max_relative = 1e-12);
}

#[test]
fn writes_route_columns_then_results() {
    let dir = tempfile::tempdir().unwrap();
    let consist_path = dir.path().join("intercity.json");
    let route_path = dir.path().join("coast_line.csv");
    fs::write(&consist_path, CONSIST).unwrap();
    fs::write(&route_path, ROUTE).unwrap();

    let spec = Consist::from_path(&consist_path).unwrap().performance().unwrap();
    let solver = RouteTimingSolver::new(&spec);
    let route = Route::from_path(&route_path).unwrap();
    let timetable = Timetable::generate(&solver, &route, Time::new::<second>(60.0)).unwrap();

    let out = output_path(&route_path);
    assert_eq!(out, dir.path().join("coast_line_timetable.csv"));
    timetable.write_path(&out).unwrap();

    let mut reader = csv::Reader::from_path(&out).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["station", "track speed (mph)", "dist (mi)", "time (min)", "avg spd (mph)"]
    );

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 4);
    assert_eq!(&records[0][0], "Union");
    assert_eq!(&records[0][3], "0");
    assert_eq!(&records[0][4], "0");
    assert_eq!(&records[2][0], "Oakdale");
    assert_eq!(&records[2][1], "110");

    let minutes: f64 = records[2][3].parse().unwrap();
    assert_relative_eq!(minutes, timetable.rows()[2].time.get::<minute>(), max_relative = 1e-12);
}

#[test]
fn failing_row_is_reported_by_number() {
    let spec = consist().performance().unwrap();
    let solver = RouteTimingSolver::new(&spec);
    let route = Route::from_reader(
        "track speed (mph),dist (mi)\n0,0\n79,5\n125,0.01\n".as_bytes(),
    )
    .unwrap();

    match Timetable::generate(&solver, &route, Time::new::<second>(120.0)) {
        Err(TimetableError::Segment {
            row: 3,
            source: KinematicsError::InfeasibleDistance { .. },
        }) => {}
        other => panic!("expected row 3 to be infeasible, got {other:?}"),
    }
}

#[test]
fn missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nowhere.csv");

    match Route::from_path(&missing) {
        Err(TimetableError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn route_average_speed_includes_dwell() {
    let spec = consist().performance().unwrap();
    let solver = RouteTimingSolver::new(&spec);
    let route = Route::from_reader(ROUTE.as_bytes()).unwrap();

    let quick = Timetable::generate(&solver, &route, Time::new::<second>(0.0)).unwrap();
    let slow = Timetable::generate(&solver, &route, Time::new::<second>(300.0)).unwrap();

    assert_relative_eq!(
        (slow.total_time() - quick.total_time()).get::<second>(),
        900.0,
        max_relative = 1e-9
    );
    assert!(slow.average_speed(&route) < quick.average_speed(&route));
    assert_relative_eq!(
        quick.average_speed(&route).get::<mile_per_hour>(),
        35.6 / quick.total_time().get::<hour>(),
        max_relative = 1e-9
    );
}

#[test]
fn bundled_sample_data_generates() {
    let data = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../data");
    let spec = Consist::from_path(data.join("intercity_consist.json"))
        .unwrap()
        .performance()
        .unwrap();
    let route = Route::from_path(data.join("coast_line.csv")).unwrap();

    let solver = RouteTimingSolver::new(&spec);
    let timetable = Timetable::generate(&solver, &route, Time::new::<second>(120.0)).unwrap();

    assert_eq!(timetable.rows().len(), route.stops().len());
    assert!(timetable.rows().iter().skip(1).all(|row| row.time.get::<second>() > 120.0));
}
