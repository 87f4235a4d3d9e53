//! Header fragment: profile fields as macro definitions for the template.

use crate::models::resume::Profile;
use crate::render::escape::escape;

/// Location split heuristically by comma count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub region_zip: String,
}

/// 3+ parts → street, city, region-zip (extra parts dropped);
/// 2 parts → city, region-zip; otherwise the whole text is the city.
pub fn split_location(location: &str) -> PostalAddress {
    if !location.contains(',') {
        return PostalAddress {
            city: location.to_string(),
            ..PostalAddress::default()
        };
    }

    let parts: Vec<&str> = location.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [street, city, region_zip, ..] => PostalAddress {
            street: street.to_string(),
            city: city.to_string(),
            region_zip: region_zip.to_string(),
        },
        [city, region_zip] => PostalAddress {
            street: String::new(),
            city: city.to_string(),
            region_zip: region_zip.to_string(),
        },
        _ => PostalAddress::default(),
    }
}

/// Renders `\newcommand` definitions for every header field.
pub fn render_meta(profile: &Profile) -> String {
    let address = split_location(&profile.location);
    let fields = [
        ("MyName", profile.name.as_str()),
        ("MyEmail", profile.email.as_str()),
        ("MyPhone", profile.phone.as_str()),
        ("MyStreetAddress", address.street.as_str()),
        ("MyCity", address.city.as_str()),
        ("MyCountryZip", address.region_zip.as_str()),
    ];

    let mut out = String::new();
    for (macro_name, value) in fields {
        out.push_str(&format!("\\newcommand{{\\{macro_name}}}{{{}}}\n", escape(value)));
    }
    out
}

/// Summary paragraph, empty when the profile has none.
pub fn render_summary(profile: &Profile) -> String {
    match &profile.summary {
        Some(summary) => format!("{}\n", escape(summary)),
        None => String::new(),
    }
}
