use anyhow::Result;

use crate::timetable::{SchoolDay, Timetable};

/// Lists every subject the timetable teaches with its colour and days.
pub fn run(timetable: &Timetable) -> Result<()> {
    println!("{}", timetable.week_name);
    for line in lines(timetable) {
        println!("{}", line);
    }
    Ok(())
}

pub fn lines(timetable: &Timetable) -> Vec<String> {
    timetable
        .subjects_in_use()
        .into_iter()
        .map(|subject| {
            let days: Vec<&str> = SchoolDay::ALL
                .iter()
                .filter(|day| timetable.slot_for(**day, &subject))
                .map(|day| day.name())
                .collect();
            format!(
                "{:<4} {} {}",
                subject,
                timetable.color_for(&subject),
                days.join(", ")
            )
        })
        .collect()
}
