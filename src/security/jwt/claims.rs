use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};
use time::OffsetDateTime;
use uuid::Uuid;

/// JWT claims struct.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Claims {
    /// Id of the user the token was issued to.
    pub sub: Uuid,
    /// Token expiration time (UTC timestamp).
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub exp: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use crate::security::jwt::Claims;
    use time::OffsetDateTime;
    use uuid::uuid;

    #[test]
    fn serialization_round_trip() -> anyhow::Result<()> {
        let claims = Claims {
            sub: uuid!("00000000-0000-0000-0000-000000000001"),
            // January 1, 2010 11:00:00
            exp: OffsetDateTime::from_unix_timestamp(1262340000)?,
        };

        let json = serde_json::to_string(&claims)?;
        assert_eq!(
            json,
            r#"{"sub":"00000000-0000-0000-0000-000000000001","exp":1262340000}"#
        );
        assert_eq!(serde_json::from_str::<Claims>(&json)?, claims);

        Ok(())
    }
}
