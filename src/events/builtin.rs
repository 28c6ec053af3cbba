//! Builtin event table for the 2024 Rogue Invitational

use crate::model::{Day, EventId, EventMetadata, EventTable};
use chrono::{NaiveDate, NaiveTime};

struct EventSpec {
    name: &'static str,
    format: &'static str,
    day: Day,
    day_of_month: u32,
    time: (u32, u32),
    intensity: u8,
    event_type: &'static str,
    primary: &'static str,
    secondary: &'static str,
    movements: &'static str,
    time_cap: Option<u32>,
}

const ROGUE_2024: [EventSpec; 9] = [
    EventSpec {
        name: "Quick Sand",
        format: "10 rounds of sandbag carry + 400m run",
        day: Day::Friday,
        day_of_month: 8,
        time: (12, 30),
        intensity: 4,
        event_type: "Endurance",
        primary: "Legs, Glutes, Core",
        secondary: "Shoulders, Stabilizers",
        movements: "Sandbag carry, 400m run",
        time_cap: None,
    },
    EventSpec {
        name: "North Sea Tiger",
        format: "Echo Bike, ring muscle-ups, snatches, shuttle sprints",
        day: Day::Friday,
        day_of_month: 8,
        time: (15, 45),
        intensity: 5,
        event_type: "Mixed (Sprint & Strength)",
        primary: "Shoulders, Chest, Legs",
        secondary: "Core, Arms",
        movements: "Echo Bike, Ring Muscle-Ups, Squat Snatches, Shuttle Sprints",
        time_cap: Some(8),
    },
    EventSpec {
        name: "Braveheart",
        format: "Wall walk complex + heavy back squats",
        day: Day::Friday,
        day_of_month: 8,
        time: (19, 15),
        intensity: 5,
        event_type: "Strength",
        primary: "Shoulders, Arms, Legs",
        secondary: "Core, Back",
        movements: "Wall Walk Complex, Heavy Back Squats",
        time_cap: None,
    },
    EventSpec {
        name: "Hunting Haggis",
        format: "Rowing, thrusters, log muscle-ups",
        day: Day::Saturday,
        day_of_month: 9,
        time: (10, 40),
        intensity: 4,
        event_type: "Endurance",
        primary: "Legs, Back, Core",
        secondary: "Shoulders, Stabilizers",
        movements: "Rowing, Thrusters, Log Muscle-Ups",
        time_cap: None,
    },
    EventSpec {
        name: "Devil's Tail",
        format: "Rope climbs, Cyr bell devil presses",
        day: Day::Saturday,
        day_of_month: 9,
        time: (13, 30),
        intensity: 3,
        event_type: "Strength",
        primary: "Arms, Shoulders, Core",
        secondary: "Legs",
        movements: "Rope Climbs, Cyr Bell Devil Presses",
        time_cap: None,
    },
    EventSpec {
        name: "The Duel IV",
        format: "Burpees Over Hay Bale, Sled Push, Power Stairs",
        day: Day::Saturday,
        day_of_month: 9,
        time: (16, 0),
        intensity: 3,
        event_type: "Strength",
        primary: "Legs, Shoulders, Core",
        secondary: "Arms, Back",
        movements: "Burpees Over Hay Bale, Sled Push, Power Stairs",
        time_cap: None,
    },
    EventSpec {
        name: "Gondola",
        format: "Pegboard Traverse, SkiErg, GHD Sit-Ups",
        day: Day::Sunday,
        day_of_month: 10,
        time: (11, 10),
        intensity: 4,
        event_type: "Mixed (Endurance & Skill)",
        primary: "Arms, Core, Legs",
        secondary: "Shoulders, Back",
        movements: "Pegboard Traverse, SkiErg, GHD Sit-Ups",
        time_cap: None,
    },
    EventSpec {
        name: "Tight Rope",
        format: "Heavy Rope Double-Unders, Cyr Bell Lunges, Handstand Walk",
        day: Day::Sunday,
        day_of_month: 10,
        time: (13, 25),
        intensity: 4,
        event_type: "Mixed (Endurance & Strength)",
        primary: "Shoulders, Core, Legs",
        secondary: "Stabilizers, Arms",
        movements: "Heavy Rope Double-Unders, Cyr Bell Lunges, Handstand Walk",
        time_cap: None,
    },
    EventSpec {
        name: "The Excavator",
        format: "Progressive Sandbag Cleans",
        day: Day::Sunday,
        day_of_month: 10,
        time: (14, 45),
        intensity: 5,
        event_type: "Strength",
        primary: "Legs, Back, Arms",
        secondary: "Core, Shoulders",
        movements: "Progressive Sandbag Cleans",
        time_cap: None,
    },
];

fn split(list: &str) -> Vec<String> {
    list.split(", ").map(String::from).collect()
}

/// The nine events of the 2024 Rogue Invitational (November 8-10, times GMT)
pub fn rogue_invitational_2024() -> EventTable {
    let events = ROGUE_2024
        .iter()
        .enumerate()
        .map(|(i, spec)| EventMetadata {
            id: EventId::new(i as u32 + 1),
            name: spec.name.to_string(),
            format: Some(spec.format.to_string()),
            day: Some(spec.day),
            date: NaiveDate::from_ymd_opt(2024, 11, spec.day_of_month),
            time: NaiveTime::from_hms_opt(spec.time.0, spec.time.1, 0),
            intensity_level: Some(spec.intensity),
            event_type: spec.event_type.to_string(),
            primary_muscles: split(spec.primary),
            secondary_muscles: split(spec.secondary),
            movements: split(spec.movements),
            time_cap_minutes: spec.time_cap,
        })
        .collect();
    EventTable::new(events)
}
