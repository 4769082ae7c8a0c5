//! Relative date presentation in Portuguese ("há 5 minutos").

use chrono::{DateTime, Utc};

/// Format the distance between `date` and `now` as Portuguese relative time.
///
/// Dates in the future (clock skew) collapse to "agora mesmo".
pub fn format_distance_pt(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - date).num_seconds().max(0);

    if seconds < 45 {
        return "agora mesmo".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 2 {
        return "há 1 minuto".to_string();
    }
    if minutes < 60 {
        return format!("há {} minutos", minutes);
    }

    let hours = minutes / 60;
    if hours < 2 {
        return "há 1 hora".to_string();
    }
    if hours < 24 {
        return format!("há {} horas", hours);
    }

    let days = hours / 24;
    if days < 2 {
        return "há 1 dia".to_string();
    }
    if days < 30 {
        return format!("há {} dias", days);
    }

    let months = days / 30;
    if months < 2 {
        return "há 1 mês".to_string();
    }
    if months < 12 {
        return format!("há {} meses", months);
    }

    let years = days / 365;
    if years < 2 {
        return "há 1 ano".to_string();
    }
    format!("há {} anos", years)
}
