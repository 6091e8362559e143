use serde::{Deserialize, Serialize};

/// Address fields as typed into the delivery form, before formatting.
///
/// Apartment number and delivery notes are optional; a blank value counts as absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryAddressForm {
    pub street_name: String,
    pub house_number: String,
    pub apartment_number: String,
    pub postal_code: String,
    pub city: String,
    pub delivery_notes: String,
}

/// A rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl DeliveryAddressForm {
    pub fn new(
        street_name: impl Into<String>,
        house_number: impl Into<String>,
        apartment_number: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
        delivery_notes: impl Into<String>,
    ) -> Self {
        Self {
            street_name: street_name.into(),
            house_number: house_number.into(),
            apartment_number: apartment_number.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            delivery_notes: delivery_notes.into(),
        }
    }

    /// Checks the mandatory fields. Returns every problem found, not only the first.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let required = [
            ("streetName", &self.street_name),
            ("houseNumber", &self.house_number),
            ("postalCode", &self.postal_code),
            ("city", &self.city),
        ];
        let errors: Vec<FieldError> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| FieldError {
                field,
                message: "must not be blank",
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Delivery details for one checkout.
///
/// `delivery_address` is always the rendering of the other fields; there is no setter and
/// the only constructor is [`format_delivery`](crate::policy::delivery::format_delivery).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    street_name: String,
    house_number: String,
    apartment_number: Option<String>,
    postal_code: String,
    city: String,
    delivery_notes: Option<String>,
    delivery_address: String,
}

impl Delivery {
    pub(crate) fn new(
        street_name: String,
        house_number: String,
        apartment_number: Option<String>,
        postal_code: String,
        city: String,
        delivery_notes: Option<String>,
        delivery_address: String,
    ) -> Self {
        Self {
            street_name,
            house_number,
            apartment_number,
            postal_code,
            city,
            delivery_notes,
            delivery_address,
        }
    }

    pub fn street_name(&self) -> &str {
        &self.street_name
    }

    pub fn house_number(&self) -> &str {
        &self.house_number
    }

    pub fn apartment_number(&self) -> Option<&str> {
        self.apartment_number.as_deref()
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn delivery_notes(&self) -> Option<&str> {
        self.delivery_notes.as_deref()
    }

    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }
}
