//! Build script to track include_str! dependencies.
//! This ensures cargo rebuilds when the embedded timetable changes.

fn main() {
    println!("cargo:rerun-if-changed=resources/timetable.json");
}
