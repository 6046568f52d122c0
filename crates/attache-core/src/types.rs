use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AttacheError;

/// ABO/Rh blood group.
///
/// # Examples
///
/// ```
/// use attache_core::BloodGroup;
///
/// let group: BloodGroup = "O-".parse().unwrap();
/// assert_eq!(format!("{group}"), "O-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APos,
    #[serde(rename = "A-")]
    ANeg,
    #[serde(rename = "B+")]
    BPos,
    #[serde(rename = "B-")]
    BNeg,
    #[serde(rename = "AB+")]
    AbPos,
    #[serde(rename = "AB-")]
    AbNeg,
    #[serde(rename = "O+")]
    OPos,
    #[serde(rename = "O-")]
    ONeg,
}

impl BloodGroup {
    /// All eight groups, in the order intake forms list them.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APos,
        BloodGroup::ANeg,
        BloodGroup::BPos,
        BloodGroup::BNeg,
        BloodGroup::AbPos,
        BloodGroup::AbNeg,
        BloodGroup::OPos,
        BloodGroup::ONeg,
    ];
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BloodGroup::APos => "A+",
            BloodGroup::ANeg => "A-",
            BloodGroup::BPos => "B+",
            BloodGroup::BNeg => "B-",
            BloodGroup::AbPos => "AB+",
            BloodGroup::AbNeg => "AB-",
            BloodGroup::OPos => "O+",
            BloodGroup::ONeg => "O-",
        };
        write!(f, "{s}")
    }
}

impl FromStr for BloodGroup {
    type Err = AttacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A+" => Ok(BloodGroup::APos),
            "A-" => Ok(BloodGroup::ANeg),
            "B+" => Ok(BloodGroup::BPos),
            "B-" => Ok(BloodGroup::BNeg),
            "AB+" => Ok(BloodGroup::AbPos),
            "AB-" => Ok(BloodGroup::AbNeg),
            "O+" => Ok(BloodGroup::OPos),
            "O-" => Ok(BloodGroup::ONeg),
            other => Err(AttacheError::Validation(format!(
                "unknown blood group: {other}"
            ))),
        }
    }
}

/// Urgency level of a blood request.
///
/// # Examples
///
/// ```
/// use attache_core::Urgency;
///
/// let u: Urgency = "critical".parse().unwrap();
/// assert_eq!(u, Urgency::Critical);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Routine request with no deadline pressure.
    #[default]
    Normal,
    /// Needed within days.
    Urgent,
    /// Needed immediately.
    Critical,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Normal => write!(f, "normal"),
            Urgency::Urgent => write!(f, "urgent"),
            Urgency::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Urgency {
    type Err = AttacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Urgency::Normal),
            "urgent" => Ok(Urgency::Urgent),
            "critical" => Ok(Urgency::Critical),
            other => Err(AttacheError::Validation(format!("unknown urgency: {other}"))),
        }
    }
}

/// Lifecycle status of a stored blood request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Submitted, not yet actioned.
    #[default]
    Pending,
    /// A donor or bank covered the request.
    Fulfilled,
    /// Withdrawn by the requester or staff.
    Cancelled,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Fulfilled => write!(f, "fulfilled"),
            RequestStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A contact-form message.
///
/// Construct through [`ContactMessage::new`] so that field validation runs
/// before the record reaches storage.
///
/// # Examples
///
/// ```
/// use attache_core::ContactMessage;
///
/// let msg = ContactMessage::new("Ada", "ada@example.com", "Hello!").unwrap();
/// assert_eq!(msg.name, "Ada");
///
/// assert!(ContactMessage::new("Ada", "not-an-email", "Hello!").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Free-text message body.
    pub message: String,
}

impl ContactMessage {
    /// Validate and build a contact message.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Validation`] when the name or message is
    /// empty, or the email is not plausible.
    pub fn new(name: &str, email: &str, message: &str) -> Result<Self, AttacheError> {
        if name.trim().is_empty() {
            return Err(AttacheError::Validation("name must not be empty".into()));
        }
        if message.trim().is_empty() {
            return Err(AttacheError::Validation("message must not be empty".into()));
        }
        validate_email(email)?;
        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.to_string(),
        })
    }
}

/// A registered donor profile.
///
/// # Examples
///
/// ```
/// use attache_core::{BloodGroup, DonorProfile};
///
/// let donor = DonorProfile::new(
///     "Rhea",
///     "rhea@example.com",
///     BloodGroup::OPos,
///     "Pune",
///     "9876543210",
///     29,
/// )
/// .unwrap();
/// assert_eq!(donor.age, 29);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Blood group.
    pub blood_group: BloodGroup,
    /// City of residence.
    pub city: String,
    /// Mobile number.
    pub mobile: String,
    /// Age in years. Donors must be 18-65.
    pub age: u8,
}

impl DonorProfile {
    /// Eligible donor age range, inclusive.
    pub const AGE_RANGE: std::ops::RangeInclusive<u8> = 18..=65;

    /// Validate and build a donor profile.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Validation`] for an empty name, city, or
    /// mobile, an implausible email, or an age outside 18-65.
    pub fn new(
        name: &str,
        email: &str,
        blood_group: BloodGroup,
        city: &str,
        mobile: &str,
        age: u8,
    ) -> Result<Self, AttacheError> {
        if name.trim().is_empty() {
            return Err(AttacheError::Validation("name must not be empty".into()));
        }
        validate_email(email)?;
        if city.trim().is_empty() {
            return Err(AttacheError::Validation("city must not be empty".into()));
        }
        if mobile.trim().is_empty() {
            return Err(AttacheError::Validation("mobile must not be empty".into()));
        }
        if !Self::AGE_RANGE.contains(&age) {
            return Err(AttacheError::Validation(format!(
                "donor age must be 18-65, got {age}"
            )));
        }
        Ok(Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            blood_group,
            city: city.trim().to_string(),
            mobile: mobile.trim().to_string(),
            age,
        })
    }
}

/// A request for blood on a patient's behalf.
///
/// # Examples
///
/// ```
/// use attache_core::{BloodGroup, BloodRequest, RequestStatus, Urgency};
///
/// let req = BloodRequest::new(
///     "Patient X",
///     BloodGroup::AbNeg,
///     "City Hospital",
///     "Mumbai",
///     Urgency::Critical,
///     "9876543210",
/// )
/// .unwrap();
/// assert_eq!(req.status, RequestStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequest {
    /// Patient name.
    pub patient_name: String,
    /// Required blood group.
    pub blood_group: BloodGroup,
    /// Hospital name.
    pub hospital: String,
    /// Location or city.
    pub location: String,
    /// Urgency level.
    pub urgency: Urgency,
    /// Contact number for coordination.
    pub contact: String,
    /// Lifecycle status. New requests start [`RequestStatus::Pending`].
    #[serde(default)]
    pub status: RequestStatus,
}

impl BloodRequest {
    /// Validate and build a blood request with status `Pending`.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Validation`] when any required field is empty.
    pub fn new(
        patient_name: &str,
        blood_group: BloodGroup,
        hospital: &str,
        location: &str,
        urgency: Urgency,
        contact: &str,
    ) -> Result<Self, AttacheError> {
        for (field, value) in [
            ("patient name", patient_name),
            ("hospital", hospital),
            ("location", location),
            ("contact", contact),
        ] {
            if value.trim().is_empty() {
                return Err(AttacheError::Validation(format!(
                    "{field} must not be empty"
                )));
            }
        }
        Ok(Self {
            patient_name: patient_name.trim().to_string(),
            blood_group,
            hospital: hospital.trim().to_string(),
            location: location.trim().to_string(),
            urgency,
            contact: contact.trim().to_string(),
            status: RequestStatus::Pending,
        })
    }
}

/// One row of blood availability at a location.
///
/// # Examples
///
/// ```
/// use attache_core::{BloodGroup, StockEntry};
///
/// let stock = StockEntry::new(BloodGroup::APos, 12, "City Hospital").unwrap();
/// assert_eq!(stock.units, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    /// Blood group in stock.
    pub group: BloodGroup,
    /// Units currently available.
    pub units: u32,
    /// Bank or hospital holding the stock.
    pub location: String,
}

impl StockEntry {
    /// Validate and build a stock entry.
    ///
    /// # Errors
    ///
    /// Returns [`AttacheError::Validation`] when the location is empty.
    pub fn new(group: BloodGroup, units: u32, location: &str) -> Result<Self, AttacheError> {
        if location.trim().is_empty() {
            return Err(AttacheError::Validation("location must not be empty".into()));
        }
        Ok(Self {
            group,
            units,
            location: location.trim().to_string(),
        })
    }
}

/// Any record the portal persists, tagged by kind.
///
/// # Examples
///
/// ```
/// use attache_core::{ContactMessage, Record};
///
/// let record = Record::Message(ContactMessage::new("Ada", "ada@example.com", "Hi").unwrap());
/// assert_eq!(record.collection(), "messages");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    /// Contact-form message.
    Message(ContactMessage),
    /// Donor registration.
    Donor(DonorProfile),
    /// Blood request.
    Request(BloodRequest),
    /// Availability row.
    Stock(StockEntry),
}

impl Record {
    /// The kind discriminant of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Message(_) => RecordKind::Message,
            Record::Donor(_) => RecordKind::Donor,
            Record::Request(_) => RecordKind::Request,
            Record::Stock(_) => RecordKind::Stock,
        }
    }

    /// Stable collection name the record is stored under.
    pub fn collection(&self) -> &'static str {
        self.kind().collection()
    }
}

/// Discriminant for [`Record`] variants, used by store queries and the CLI.
///
/// # Examples
///
/// ```
/// use attache_core::RecordKind;
///
/// let kind: RecordKind = "request".parse().unwrap();
/// assert_eq!(kind.collection(), "requests");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Message,
    Donor,
    Request,
    Stock,
}

impl RecordKind {
    /// Stable collection name for this kind.
    pub fn collection(self) -> &'static str {
        match self {
            RecordKind::Message => "messages",
            RecordKind::Donor => "donors",
            RecordKind::Request => "requests",
            RecordKind::Stock => "inventory",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Message => write!(f, "message"),
            RecordKind::Donor => write!(f, "donor"),
            RecordKind::Request => write!(f, "request"),
            RecordKind::Stock => write!(f, "stock"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = AttacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "message" | "messages" => Ok(RecordKind::Message),
            "donor" | "donors" => Ok(RecordKind::Donor),
            "request" | "requests" => Ok(RecordKind::Request),
            "stock" | "inventory" => Ok(RecordKind::Stock),
            other => Err(AttacheError::Validation(format!(
                "unknown record kind: {other}"
            ))),
        }
    }
}

fn validate_email(email: &str) -> Result<(), AttacheError> {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return Err(AttacheError::Validation(format!(
            "email missing '@': {email}"
        )));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(AttacheError::Validation(format!(
            "implausible email: {email}"
        )));
    }
    Ok(())
}
