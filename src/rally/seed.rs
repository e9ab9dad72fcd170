//! Sample rallies every new store starts with

use chrono::{DateTime, NaiveDate, Utc};

use super::types::{Comment, NewComment, Rally, Token};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn comment(id: &str, rally_id: &str, address: &str, message: &str, at: DateTime<Utc>) -> Comment {
    Comment::with_timestamp(id, rally_id, NewComment::new(address, message), at)
}

/// The six sample rallies, newest first
pub fn sample_rallies() -> Vec<Rally> {
    vec![
        Rally::new(
            "1",
            "Community Garden Project",
            "Help us build a sustainable garden for our local community.",
            5000.0,
            Token::Ntrn,
        )
        .image("https://images.unsplash.com/photo-1585320806297-9794b3e4eeae?q=80&w=2942&auto=format&fit=crop")
        .raised(3200.0)
        .creator("neutron1abc...")
        .days_left(12)
        .created_at(date(2024, 2, 15))
        .comment(comment(
            "c1",
            "1",
            "neutron1def...",
            "This is exactly what our community needs! I'm excited to see this project come to life.",
            date(2024, 2, 20),
        ))
        .comment(comment(
            "c2",
            "1",
            "neutron1ghi...",
            "Will there be educational workshops as part of this project?",
            date(2024, 2, 22),
        )),
        Rally::new(
            "2",
            "Decentralized Education Platform",
            "Creating accessible education through blockchain technology.",
            10000.0,
            Token::TAtom,
        )
        .image("https://images.unsplash.com/photo-1501504905252-473c47e087f8?q=80&w=3174&auto=format&fit=crop")
        .raised(4500.0)
        .creator("neutron1def...")
        .days_left(20)
        .created_at(date(2024, 2, 10))
        .comment(comment(
            "c3",
            "2",
            "neutron1jkl...",
            "Education should be accessible to everyone. Great initiative!",
            date(2024, 2, 15),
        )),
        Rally::new(
            "3",
            "Clean Water Initiative",
            "Bringing clean water solutions to communities in need.",
            7500.0,
            Token::Ntrn,
        )
        .image("https://images.unsplash.com/photo-1436262513933-a0b06755c784?q=80&w=2071&auto=format&fit=crop")
        .raised(6800.0)
        .creator("neutron1ghi...")
        .days_left(5)
        .created_at(date(2024, 2, 5))
        .comment(comment(
            "c4",
            "3",
            "neutron1mno...",
            "Clean water is a basic human right. Happy to support this cause.",
            date(2024, 2, 8),
        )),
        Rally::new(
            "4",
            "Renewable Energy Research",
            "Funding innovative solutions for sustainable energy.",
            15000.0,
            Token::TAtom,
        )
        .image("https://images.unsplash.com/photo-1473341304170-971dccb5ac1e?q=80&w=2940&auto=format&fit=crop")
        .raised(2300.0)
        .creator("neutron1jkl...")
        .days_left(30)
        .created_at(date(2024, 1, 25)),
        Rally::new(
            "5",
            "Open Source Development Fund",
            "Supporting developers working on critical open source projects.",
            8000.0,
            Token::Ntrn,
        )
        .image("https://images.unsplash.com/photo-1558494949-ef010cbdcc31?q=80&w=2034&auto=format&fit=crop")
        .raised(1200.0)
        .creator("neutron1mno...")
        .days_left(25)
        .created_at(date(2024, 1, 15)),
        Rally::new(
            "6",
            "Wildlife Conservation Project",
            "Protecting endangered species and their habitats.",
            12000.0,
            Token::TAtom,
        )
        .image("https://images.unsplash.com/photo-1535338454770-8be927b5a00b?q=80&w=2942&auto=format&fit=crop")
        .raised(9800.0)
        .creator("neutron1pqr...")
        .days_left(8)
        .created_at(date(2024, 1, 10)),
    ]
}
