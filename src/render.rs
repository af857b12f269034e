use crate::geolocation::Coordinates;
use crate::state::LocationState;

const MAP_EMBED_ENDPOINT: &str = "https://www.google.com/maps/embed/v1/place";

/// URL of an embeddable map centred on `coordinates`.
pub fn map_embed_url(api_key: &str, coordinates: Coordinates) -> String {
    format!(
        "{}?key={}&q={},{}",
        MAP_EMBED_ENDPOINT, api_key, coordinates.latitude, coordinates.longitude
    )
}

/// Text view of the current state.
pub fn render(state: &LocationState, api_key: &str) -> String {
    let mut lines = Vec::new();

    if state.loading {
        lines.push("Fetching location...".to_string());
    }

    if let Some(coordinates) = state.coordinates {
        let or_blank = |value: &Option<String>| value.clone().unwrap_or_default();
        let offset = state
            .gmt_offset
            .map(|hours| hours.to_string())
            .unwrap_or_default();

        lines.push(format!(
            "Latitude: {} | Longitude: {}",
            coordinates.latitude, coordinates.longitude
        ));
        lines.push(format!("Map: {}", map_embed_url(api_key, coordinates)));
        lines.push(format!("Address: {}", or_blank(&state.address)));
        lines.push(format!("Time Zone: {}", or_blank(&state.timezone)));
        lines.push(format!("GMT Offset: {} Hours", offset));
        lines.push(format!("Current Time: {}", or_blank(&state.current_time)));
    }

    if let Some(error) = &state.error {
        lines.push(format!("Error: {}", error));
    }

    lines.iter().map(|line| format!("{line}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LocationEvent;

    #[test]
    fn empty_state_renders_nothing() {
        assert_eq!(render(&LocationState::default(), "key"), "");
    }

    #[test]
    fn renders_loading_and_error() {
        let loading = LocationState::default().apply(LocationEvent::AcquisitionStarted);
        assert_eq!(render(&loading, "key"), "Fetching location...\n");

        let failed = loading.apply(LocationEvent::AcquisitionUnsupported);
        assert_eq!(
            render(&failed, "key"),
            "Error: Geolocation is not supported by your browser\n"
        );
    }

    #[test]
    fn located_state_without_lookups_renders_blank_fields() {
        let coordinates = Coordinates::new(-33.8688, 151.2093).unwrap();
        let state = LocationState::default()
            .apply(LocationEvent::AcquisitionStarted)
            .apply(LocationEvent::PositionAcquired(coordinates));

        let text = render(&state, "key");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Latitude: -33.8688 | Longitude: 151.2093");
        assert_eq!(lines[2], "Address: ");
        assert_eq!(lines[4], "GMT Offset:  Hours");
        assert!(text.ends_with("Current Time: \n"));
    }

    #[test]
    fn renders_resolved_location() {
        let coordinates = Coordinates::new(40.7484, -73.9857).unwrap();
        let state = LocationState::default()
            .apply(LocationEvent::PositionAcquired(coordinates))
            .apply(LocationEvent::AddressResolved(
                "20 W 34th St, New York, NY 10001, USA".to_string(),
            ))
            .apply(LocationEvent::TimeZoneResolved {
                name: "Eastern Daylight Time".to_string(),
                gmt_offset: -5.0,
                current_time: "Monday, October 19, 2026 6:04 PM".to_string(),
            });

        let text = render(&state, "abc");
        assert_eq!(
            text,
            "Latitude: 40.7484 | Longitude: -73.9857\n\
             Map: https://www.google.com/maps/embed/v1/place?key=abc&q=40.7484,-73.9857\n\
             Address: 20 W 34th St, New York, NY 10001, USA\n\
             Time Zone: Eastern Daylight Time\n\
             GMT Offset: -5 Hours\n\
             Current Time: Monday, October 19, 2026 6:04 PM\n"
        );
    }
}
