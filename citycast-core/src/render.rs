//! Text rendering for the reading view.

use crate::model::WeatherReading;

pub fn reading_lines(reading: &WeatherReading) -> Vec<String> {
    vec![
        reading.location.clone(),
        format!("{}°C", reading.temperature_c),
        reading.description.clone(),
        format!("Humidity: {}%", reading.humidity_pct),
        format!("Wind Speed: {} m/s", reading.wind_speed_mps),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> WeatherReading {
        WeatherReading {
            location: "Paris, FR".into(),
            temperature_c: 19,
            description: "clear sky".into(),
            humidity_pct: 55,
            wind_speed_mps: 3.1,
        }
    }

    #[test]
    fn renders_every_field() {
        assert_eq!(
            reading_lines(&paris()),
            vec!["Paris, FR", "19°C", "clear sky", "Humidity: 55%", "Wind Speed: 3.1 m/s"]
        );
    }

    #[test]
    fn whole_wind_speed_has_no_fraction() {
        let reading = WeatherReading { wind_speed_mps: 3.0, ..paris() };
        assert_eq!(reading_lines(&reading)[4], "Wind Speed: 3 m/s");
    }

    #[test]
    fn display_joins_lines() {
        let text = paris().to_string();
        assert!(text.starts_with("Paris, FR\n19°C\n"));
        assert!(text.ends_with("Wind Speed: 3.1 m/s"));
    }
}
