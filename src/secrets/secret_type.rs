use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Discriminates the three payload kinds a secret can hold. The type is
/// fixed when the secret is created and can never change afterwards.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SecretType {
    Credentials,
    CreditCard,
    BinaryData,
}

impl SecretType {
    /// Returns the stable textual form used for the storage column.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretType::Credentials => "credentials",
            SecretType::CreditCard => "credit_card",
            SecretType::BinaryData => "binary_data",
        }
    }
}

impl FromStr for SecretType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "credentials" => Ok(SecretType::Credentials),
            "credit_card" => Ok(SecretType::CreditCard),
            "binary_data" => Ok(SecretType::BinaryData),
            value => Err(anyhow::anyhow!("Unknown secret type: {value}.")),
        }
    }
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SecretType;
    use insta::assert_json_snapshot;
    use std::str::FromStr;

    #[test]
    fn serialization() {
        assert_json_snapshot!(SecretType::Credentials, @r###""credentials""###);
        assert_json_snapshot!(SecretType::CreditCard, @r###""creditCard""###);
        assert_json_snapshot!(SecretType::BinaryData, @r###""binaryData""###);
    }

    #[test]
    fn storage_form_round_trip() -> anyhow::Result<()> {
        for secret_type in [
            SecretType::Credentials,
            SecretType::CreditCard,
            SecretType::BinaryData,
        ] {
            assert_eq!(SecretType::from_str(secret_type.as_str())?, secret_type);
        }

        assert!(SecretType::from_str("unknown").is_err());
        assert!(SecretType::from_str("").is_err());

        Ok(())
    }
}
