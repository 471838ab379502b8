//! User model and its sub-objects.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CoverPhoto;

/// A Facebook user as of Graph API v2.6.
///
/// Most fields need extra permissions from the user; fields the token cannot
/// see are simply absent from the response and left as `None`.
/// See <https://developers.facebook.com/docs/graph-api/reference/user>.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// App-scoped user ID
    pub id: String,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// First name
    #[serde(default)]
    pub first_name: Option<String>,
    /// Middle name
    #[serde(default)]
    pub middle_name: Option<String>,
    /// Last name
    #[serde(default)]
    pub last_name: Option<String>,
    /// Gender as reported by the user
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Age bracket
    #[serde(default)]
    pub age_range: Option<AgeRange>,
    /// Birthday
    #[serde(default)]
    pub birthday: Option<Birthday>,
    /// Primary email
    #[serde(default)]
    pub email: Option<String>,
    /// Profile URL
    #[serde(default)]
    pub link: Option<String>,
    /// Personal website
    #[serde(default)]
    pub website: Option<String>,
    /// Locale, e.g. `en_US`
    #[serde(default)]
    pub locale: Option<String>,
    /// Offset from UTC, in hours
    #[serde(default)]
    pub timezone: Option<f64>,
    /// Cover photo
    #[serde(default)]
    pub cover: Option<CoverPhoto>,
    /// Whether the user is verified by Facebook
    #[serde(default)]
    pub is_verified: bool,
    /// Whether the user has verified their account
    #[serde(default)]
    pub verified: bool,
    /// Whether the user has installed the calling app
    #[serde(default)]
    pub installed: bool,
    /// Last profile update
    #[serde(default, with = "graph_time::option")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// A user's gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Any other value the user chose
    #[serde(other)]
    Other,
}

/// The age bracket of a user.
///
/// Either bound may be absent (`{"min": 21}` means "21 or older").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    /// Lower bound
    #[serde(default)]
    pub min: Option<u32>,
    /// Upper bound
    #[serde(default)]
    pub max: Option<u32>,
}

/// A birthday, exchanged as `MM/DD/YYYY` text.
///
/// # Example
///
/// ```
/// use facebook_rs::models::Birthday;
///
/// let bd: Birthday = "04/27/1988".parse().unwrap();
/// assert_eq!(bd.to_string(), "04/27/1988");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Birthday(pub NaiveDate);

impl Birthday {
    const FORMAT: &'static str = "%m/%d/%Y";

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl std::str::FromStr for Birthday {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, Self::FORMAT).map(Birthday)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for Birthday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Birthday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e| {
            serde::de::Error::custom(format!("invalid birthday {:?}: {}", s, e))
        })
    }
}

/// Graph timestamps look like `2016-04-27T19:48:50+0000`, which is not
/// RFC 3339; both forms are accepted.
pub(crate) mod graph_time {
    use chrono::{DateTime, Utc};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

    pub(crate) fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_str(s, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(s))
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub(crate) mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub(crate) fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.collect_str(&dt.format(super::FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            Option::<String>::deserialize(deserializer)?
                .map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_deserialize_user() {
        let json = r#"{
            "id": "15504121",
            "name": "Jimmy Sawczuk",
            "first_name": "Jimmy",
            "last_name": "Sawczuk",
            "gender": "male",
            "age_range": {"min": 21},
            "birthday": "04/27/1988",
            "locale": "en_US",
            "timezone": -4,
            "verified": true,
            "updated_time": "2016-04-27T19:48:50+0000"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.name, "Jimmy Sawczuk");
        assert_eq!(user.gender, Some(Gender::Male));
        assert_eq!(user.age_range, Some(AgeRange { min: Some(21), max: None }));
        assert_eq!(user.birthday.unwrap().date().year(), 1988);
        assert_eq!(user.timezone, Some(-4.0));
        assert!(user.verified);
        assert!(!user.is_verified);

        let updated = user.updated_time.unwrap();
        assert_eq!(updated.hour(), 19);
        assert_eq!(updated.day(), 27);
    }

    #[test]
    fn test_unknown_gender() {
        let user: User = serde_json::from_str(r#"{"id":"1","gender":"custom"}"#).unwrap();
        assert_eq!(user.gender, Some(Gender::Other));
    }

    #[test]
    fn test_birthday_requires_full_date() {
        assert!("04/27".parse::<Birthday>().is_err());
        assert!(serde_json::from_str::<User>(r#"{"id":"1","birthday":"1988"}"#).is_err());
    }

    #[test]
    fn test_birthday_serializes_as_text() {
        let bd: Birthday = "12/01/1990".parse().unwrap();
        assert_eq!(serde_json::to_string(&bd).unwrap(), r#""12/01/1990""#);
    }

    #[test]
    fn test_rfc3339_updated_time() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","updated_time":"2016-04-27T19:48:50Z"}"#).unwrap();
        assert_eq!(user.updated_time.unwrap().minute(), 48);
    }
}
