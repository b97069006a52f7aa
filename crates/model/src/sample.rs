//! Built-in sample dataset, used when no prior snapshot exists.

use chrono::NaiveDate;

use crate::pin::{ChecklistItem, Memory, Photo, Pin, PinDetails, RouteWaypoint, Trip};

fn d(s: &str) -> NaiveDate {
    s.parse().expect("sample dates are literal ISO dates")
}

fn photo(id: &str, url: &str, caption: &str, taken: &str) -> Photo {
    Photo {
        id: id.to_string(),
        url: url.to_string(),
        caption: Some(caption.to_string()),
        date_taken: Some(d(taken)),
    }
}

fn item(id: &str, text: &str, done: bool) -> ChecklistItem {
    ChecklistItem {
        id: id.to_string(),
        text: text.to_string(),
        done,
    }
}

fn waypoint(id: &str, name: &str, order: i32) -> RouteWaypoint {
    RouteWaypoint {
        id: id.to_string(),
        name: name.to_string(),
        order,
    }
}

/// Three past memories and three planned trips.
pub fn sample_pins() -> Vec<Pin> {
    vec![
        Pin::past("paris-2023", 48.8566, 2.3522)
            .with_place("Paris", "France")
            .with_title("The Parisian Dream")
            .with_details(PinDetails::Past(Memory {
                visited_date: Some(d("2023-05-14")),
                memory_note: Some(
                    "Rainy afternoons in Montmartre. Best coffee of my life. \
                     The city has a way of slowing time."
                        .to_string(),
                ),
                photos: vec![
                    photo(
                        "p1",
                        "https://images.unsplash.com/photo-1502602898657-3e91760cbb34?w=400&q=80",
                        "Eiffel at golden hour",
                        "2023-05-14",
                    ),
                    photo(
                        "p2",
                        "https://images.unsplash.com/photo-1499856871958-5b9627545d1a?w=400&q=80",
                        "Montmartre streets",
                        "2023-05-15",
                    ),
                    photo(
                        "p3",
                        "https://images.unsplash.com/photo-1520939817895-060bdaf4fe1b?w=400&q=80",
                        "Café au lait mornings",
                        "2023-05-16",
                    ),
                ],
            })),
        Pin::past("kyoto-2022", 35.0116, 135.7681)
            .with_place("Kyoto", "Japan")
            .with_title("Ancient Kyoto")
            .with_details(PinDetails::Past(Memory {
                visited_date: Some(d("2022-11-10")),
                memory_note: Some(
                    "Golden Pavilion at sunset. Truly magical silence among a \
                     thousand tourists."
                        .to_string(),
                ),
                photos: vec![
                    photo(
                        "k1",
                        "https://images.unsplash.com/photo-1545569341-9eb8b30979d9?w=400&q=80",
                        "Golden Pavilion",
                        "2022-11-10",
                    ),
                    photo(
                        "k2",
                        "https://images.unsplash.com/photo-1528360983277-13d401cdc186?w=400&q=80",
                        "Fushimi Inari gates",
                        "2022-11-11",
                    ),
                    photo(
                        "k3",
                        "https://images.unsplash.com/photo-1493976040374-85c8e12f0c0e?w=400&q=80",
                        "Arashiyama bamboo",
                        "2022-11-12",
                    ),
                ],
            })),
        Pin::past("santorini-2021", 36.3932, 25.4615)
            .with_place("Santorini", "Greece")
            .with_title("Islands in the Aegean")
            .with_details(PinDetails::Past(Memory {
                visited_date: Some(d("2021-07-20")),
                memory_note: Some(
                    "Whitewash and blue domes. Every photo looks like a painting.".to_string(),
                ),
                photos: vec![
                    photo(
                        "s1",
                        "https://images.unsplash.com/photo-1570077188670-e3a8d69ac5ff?w=400&q=80",
                        "Blue domes of Oia",
                        "2021-07-20",
                    ),
                    photo(
                        "s2",
                        "https://images.unsplash.com/photo-1601581875039-e899893d520c?w=400&q=80",
                        "Sunset at Oia",
                        "2021-07-21",
                    ),
                ],
            })),
        Pin::future("tokyo-future", 35.6762, 139.6503)
            .with_place("Tokyo", "Japan")
            .with_title("Cherry Blossom Season")
            .with_details(PinDetails::Future(Trip {
                trip_start_date: Some(d("2026-03-25")),
                trip_end_date: Some(d("2026-04-05")),
                trip_notes: Some(
                    "Must see sakura at Shinjuku Gyoen. Book tickets early.".to_string(),
                ),
                checklist: vec![
                    item("tc1", "Book flights ✈️", true),
                    item("tc2", "Reserve ryokan in Asakusa", true),
                    item("tc3", "Get JR Pass", false),
                    item("tc4", "Visit Tsukiji for breakfast", false),
                    item("tc5", "Day trip to Nikko", false),
                ],
                waypoints: vec![
                    waypoint("w1", "Shinjuku Gyoen", 1),
                    waypoint("w2", "Senso-ji Temple, Asakusa", 2),
                    waypoint("w3", "teamLab Planets", 3),
                ],
            })),
        Pin::future("machu-picchu-future", -13.1631, -72.545)
            .with_place("Machu Picchu", "Peru")
            .with_title("The Inca Trail")
            .with_details(PinDetails::Future(Trip {
                trip_start_date: Some(d("2026-08-10")),
                trip_end_date: Some(d("2026-08-20")),
                trip_notes: Some("Altitude sickness medication. Train from Cusco.".to_string()),
                checklist: vec![
                    item("mc1", "Buy Inca Trail permits", false),
                    item("mc2", "Book Cusco hotel", false),
                    item("mc3", "Get altitude sickness meds", false),
                    item("mc4", "Research guided tours", true),
                ],
                waypoints: vec![
                    waypoint("w4", "Cusco city tour", 1),
                    waypoint("w5", "Sacred Valley", 2),
                    waypoint("w6", "Machu Picchu citadel", 3),
                ],
            })),
        Pin::future("reykjavik-future", 64.1466, -21.9426)
            .with_place("Reykjavik", "Iceland")
            .with_title("Northern Lights Hunt")
            .with_details(PinDetails::Future(Trip {
                trip_start_date: Some(d("2026-12-01")),
                trip_end_date: Some(d("2026-12-10")),
                trip_notes: Some(
                    "Winter is the only time for aurora. Go outside the city for \
                     dark skies."
                        .to_string(),
                ),
                checklist: vec![
                    item("rc1", "Rent a 4x4 SUV", false),
                    item("rc2", "Buy thermal gear", false),
                    item("rc3", "Book Blue Lagoon visit", true),
                    item("rc4", "Download aurora forecast app", false),
                ],
                waypoints: vec![
                    waypoint("w7", "Golden Circle route", 1),
                    waypoint("w8", "Jokulsarlon glacier lagoon", 2),
                    waypoint("w9", "Blue Lagoon", 3),
                ],
            })),
    ]
}
