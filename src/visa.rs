use crate::api::types::CreateApplicationRequest;
use crate::api::{ApiClient, HttpTransport};
use crate::routes;

/// Status sent when a new application record is created.
pub const INITIAL_STATUS: &str = "draft";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisaCategory {
    Work,
    Study,
    Visit,
    Family,
    Investment,
}

impl VisaCategory {
    pub fn label(&self) -> &'static str {
        match self {
            VisaCategory::Work => "Work",
            VisaCategory::Study => "Study",
            VisaCategory::Visit => "Visit",
            VisaCategory::Family => "Family",
            VisaCategory::Investment => "Investment",
        }
    }
}

/// Display metadata for one selectable visa type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisaInfo {
    /// Identifier sent to the backend as `visa_type`.
    pub code: &'static str,
    pub name: &'static str,
    pub category: VisaCategory,
    pub summary: &'static str,
    pub processing_time: &'static str,
    pub requirements: &'static [&'static str],
}

pub const VISA_CATALOG: &[VisaInfo] = &[
    VisaInfo {
        code: "H1-B",
        name: "Specialty Occupation",
        category: VisaCategory::Work,
        summary: "For professionals with a US job offer in a field requiring a bachelor's degree or higher.",
        processing_time: "3-6 months",
        requirements: &["Employer sponsorship", "Bachelor's degree or equivalent", "Approved LCA"],
    },
    VisaInfo {
        code: "L-1",
        name: "Intracompany Transferee",
        category: VisaCategory::Work,
        summary: "For managers and specialists transferring to a US office of their current employer.",
        processing_time: "2-4 months",
        requirements: &["One year with the company abroad", "Qualifying corporate relationship"],
    },
    VisaInfo {
        code: "O-1",
        name: "Extraordinary Ability",
        category: VisaCategory::Work,
        summary: "For individuals with sustained national or international acclaim in their field.",
        processing_time: "2-3 months",
        requirements: &["Evidence of extraordinary ability", "Advisory opinion", "US employer or agent"],
    },
    VisaInfo {
        code: "F1",
        name: "Academic Student",
        category: VisaCategory::Study,
        summary: "For full-time students admitted to an accredited US school or university.",
        processing_time: "1-3 months",
        requirements: &["Form I-20", "Proof of funds", "SEVIS fee payment"],
    },
    VisaInfo {
        code: "J1",
        name: "Exchange Visitor",
        category: VisaCategory::Study,
        summary: "For approved exchange programs: research, teaching, internships and au pairs.",
        processing_time: "1-2 months",
        requirements: &["Form DS-2019", "Program sponsor", "Health insurance"],
    },
    VisaInfo {
        code: "B1/B2",
        name: "Business & Tourism",
        category: VisaCategory::Visit,
        summary: "For short business trips, tourism, or visiting family and friends.",
        processing_time: "2-8 weeks",
        requirements: &["Proof of ties abroad", "Travel itinerary", "Sufficient funds"],
    },
    VisaInfo {
        code: "K-1",
        name: "Fiance(e)",
        category: VisaCategory::Family,
        summary: "For the foreign fiance(e) of a US citizen, to marry within 90 days of arrival.",
        processing_time: "6-9 months",
        requirements: &["US citizen petitioner", "Met in person within two years", "Intent to marry"],
    },
    VisaInfo {
        code: "EB-5",
        name: "Immigrant Investor",
        category: VisaCategory::Investment,
        summary: "Permanent residence through a qualifying investment that creates US jobs.",
        processing_time: "2-4 years",
        requirements: &["Qualifying capital investment", "Ten full-time jobs", "Lawful source of funds"],
    },
];

pub fn find_visa(code: &str) -> Option<&'static VisaInfo> {
    VISA_CATALOG
        .iter()
        .find(|v| v.code.eq_ignore_ascii_case(code.trim()))
}

/// Catalog entries in the given category, in catalog order.
pub fn visas_in(category: VisaCategory) -> impl Iterator<Item = &'static VisaInfo> {
    VISA_CATALOG.iter().filter(move |v| v.category == category)
}

/// Display name for a backend visa identifier, falling back to the raw code.
pub fn visa_label(code: &str) -> String {
    match find_visa(code) {
        Some(info) => format!("{} ({})", info.code, info.name),
        None => code.to_string(),
    }
}

/// Create the application record for the chosen visa type.
///
/// Returns the route of the new application's detail page.
pub async fn start_application<T: HttpTransport>(
    client: &ApiClient<T>,
    code: &str,
) -> Result<String, String> {
    let info = find_visa(code).ok_or_else(|| format!("Unknown visa type: {}", code))?;

    let request = CreateApplicationRequest {
        visa_type: info.code.to_string(),
        status: INITIAL_STATUS.to_string(),
    };
    let application = client
        .create_application(&request)
        .await
        .map_err(|e| e.user_message("Could not start your application. Please try again."))?;

    log::info!("Created application {} for {}", application.id, info.code);
    Ok(routes::application_detail(&application.id))
}
