use crate::model::{Delivery, DeliveryAddressForm};

/// Renders the single-line delivery address.
///
/// `"{street} {house}, Apt. {apartment}, {postal} {city}, {notes}"`, with the apartment
/// segment and the notes segment left out (separator included) when blank.
pub fn format_delivery_address(
    street_name: &str,
    house_number: &str,
    apartment_number: Option<&str>,
    postal_code: &str,
    city: &str,
    delivery_notes: Option<&str>,
) -> String {
    let mut address = format!("{street_name} {house_number}");
    if let Some(apartment) = apartment_number.and_then(non_blank) {
        address.push_str(", Apt. ");
        address.push_str(apartment);
    }
    address.push_str(&format!(", {postal_code} {city}"));
    if let Some(notes) = delivery_notes.and_then(non_blank) {
        address.push_str(", ");
        address.push_str(notes);
    }
    address
}

/// Builds a [`Delivery`] from the submitted form, computing its formatted address.
pub fn format_delivery(form: &DeliveryAddressForm) -> Delivery {
    let apartment_number = non_blank(&form.apartment_number).map(str::to_string);
    let delivery_notes = non_blank(&form.delivery_notes).map(str::to_string);
    let delivery_address = format_delivery_address(
        &form.street_name,
        &form.house_number,
        apartment_number.as_deref(),
        &form.postal_code,
        &form.city,
        delivery_notes.as_deref(),
    );

    Delivery::new(
        form.street_name.clone(),
        form.house_number.clone(),
        apartment_number,
        form.postal_code.clone(),
        form.city.clone(),
        delivery_notes,
        delivery_address,
    )
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_address() {
        let form = DeliveryAddressForm::new("Main Street", "123", "42", "10000", "TestCity", "Leave at door");
        let delivery = format_delivery(&form);
        assert_eq!(
            delivery.delivery_address(),
            "Main Street 123, Apt. 42, 10000 TestCity, Leave at door"
        );
        assert_eq!(delivery.apartment_number(), Some("42"));
    }

    #[test]
    fn apartment_segment_dropped_when_blank() {
        let form = DeliveryAddressForm::new("Main Street", "123", "", "10000", "TestCity", "Leave at door");
        assert_eq!(
            format_delivery(&form).delivery_address(),
            "Main Street 123, 10000 TestCity, Leave at door"
        );
    }

    #[test]
    fn notes_segment_dropped_when_blank() {
        let form = DeliveryAddressForm::new("Main Street", "123", "42", "10000", "TestCity", "   ");
        let delivery = format_delivery(&form);
        assert_eq!(delivery.delivery_address(), "Main Street 123, Apt. 42, 10000 TestCity");
        assert_eq!(delivery.delivery_notes(), None);
    }

    #[test]
    fn both_optional_segments_absent() {
        assert_eq!(
            format_delivery_address("Main Street", "123", None, "10000", "TestCity", None),
            "Main Street 123, 10000 TestCity"
        );
    }
}
