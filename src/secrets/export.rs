use crate::secrets::SecretsError;
use serde::Serialize;
use std::io::{Cursor, Write};
use time::OffsetDateTime;
use uuid::Uuid;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

/// Archive entry holding the credentials document.
pub(crate) const CREDENTIALS_DOCUMENT: &str = "credentials.json";
/// Archive entry holding the payment cards document.
pub(crate) const CREDIT_CARDS_DOCUMENT: &str = "credit_cards.json";
/// Entry-name stem used for binary secrets without a filename.
pub(crate) const DEFAULT_BINARY_NAME: &str = "bin_data";

/// A decrypted credentials secret as it appears in the export document.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialsEntry {
    pub id: Uuid,
    pub description: String,
    pub login: String,
    pub password: String,
}

/// A decrypted payment card secret as it appears in the export document.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreditCardEntry {
    pub id: Uuid,
    pub description: String,
    pub number: String,
    pub holder_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiry_date: OffsetDateTime,
    pub cvv: String,
}

/// A decrypted binary secret, written as its own archive entry.
#[derive(Debug)]
pub(crate) struct BinaryEntry {
    pub id: Uuid,
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl BinaryEntry {
    /// Entry name: the original filename when known, otherwise a fixed
    /// stem, with the secret id appended to disambiguate collisions.
    fn entry_name(&self) -> String {
        let stem = self.filename.as_deref().unwrap_or(DEFAULT_BINARY_NAME);
        format!("{stem}_{}", self.id)
    }
}

/// Assembles the export archive. Empty groups contribute no entry, and the
/// write order is fixed (credentials document, cards document, then binary
/// entries in group order) so that identical inputs produce identical
/// archive bytes.
pub(crate) fn build_archive(
    credentials: &[CredentialsEntry],
    credit_cards: &[CreditCardEntry],
    binary_data: &[BinaryEntry],
) -> Result<Vec<u8>, SecretsError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);

    if !credentials.is_empty() {
        let document = serde_json::to_vec_pretty(credentials).map_err(SecretsError::archive)?;
        zip.start_file(CREDENTIALS_DOCUMENT, options)
            .map_err(SecretsError::archive)?;
        zip.write_all(&document).map_err(SecretsError::archive)?;
    }

    if !credit_cards.is_empty() {
        let document = serde_json::to_vec_pretty(credit_cards).map_err(SecretsError::archive)?;
        zip.start_file(CREDIT_CARDS_DOCUMENT, options)
            .map_err(SecretsError::archive)?;
        zip.write_all(&document).map_err(SecretsError::archive)?;
    }

    for entry in binary_data {
        zip.start_file(entry.entry_name(), options)
            .map_err(SecretsError::archive)?;
        zip.write_all(&entry.bytes).map_err(SecretsError::archive)?;
    }

    let cursor = zip.finish().map_err(SecretsError::archive)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::{BinaryEntry, CredentialsEntry, CreditCardEntry, build_archive};
    use insta::assert_json_snapshot;
    use std::io::Read;
    use time::macros::datetime;
    use uuid::uuid;
    use zip::ZipArchive;

    #[test]
    fn binary_entry_names() {
        let entry = BinaryEntry {
            id: uuid!("00000000-0000-0000-0000-000000000007"),
            filename: Some("report.pdf".to_string()),
            bytes: vec![],
        };
        assert_eq!(
            entry.entry_name(),
            "report.pdf_00000000-0000-0000-0000-000000000007"
        );

        let entry = BinaryEntry {
            id: uuid!("00000000-0000-0000-0000-000000000007"),
            filename: None,
            bytes: vec![],
        };
        assert_eq!(
            entry.entry_name(),
            "bin_data_00000000-0000-0000-0000-000000000007"
        );
    }

    #[test]
    fn document_serialization() {
        let credentials = CredentialsEntry {
            id: uuid!("00000000-0000-0000-0000-000000000001"),
            description: "mail".to_string(),
            login: "postmaster".to_string(),
            password: "p@$$w0rd".to_string(),
        };
        assert_json_snapshot!(credentials, @r###"
        {
          "id": "00000000-0000-0000-0000-000000000001",
          "description": "mail",
          "login": "postmaster",
          "password": "p@$$w0rd"
        }
        "###);

        let card = CreditCardEntry {
            id: uuid!("00000000-0000-0000-0000-000000000002"),
            description: "main card".to_string(),
            number: "4539148803436467".to_string(),
            holder_name: "JOHN DOE".to_string(),
            expiry_date: datetime!(2030-06-30 0:00 UTC),
            cvv: "715".to_string(),
        };
        assert_json_snapshot!(card, @r###"
        {
          "id": "00000000-0000-0000-0000-000000000002",
          "description": "main card",
          "number": "4539148803436467",
          "holderName": "JOHN DOE",
          "expiryDate": "2030-06-30T00:00:00Z",
          "cvv": "715"
        }
        "###);
    }

    #[test]
    fn empty_groups_produce_an_empty_archive() -> anyhow::Result<()> {
        let archive_bytes = build_archive(&[], &[], &[])?;
        let archive = ZipArchive::new(std::io::Cursor::new(archive_bytes))?;
        assert_eq!(archive.len(), 0);

        Ok(())
    }

    #[test]
    fn writes_groups_in_a_fixed_order() -> anyhow::Result<()> {
        let credentials = vec![CredentialsEntry {
            id: uuid!("00000000-0000-0000-0000-000000000001"),
            description: "mail".to_string(),
            login: "a".to_string(),
            password: "b".to_string(),
        }];
        let cards = vec![CreditCardEntry {
            id: uuid!("00000000-0000-0000-0000-000000000002"),
            description: "card".to_string(),
            number: "4539148803436467".to_string(),
            holder_name: "JOHN DOE".to_string(),
            expiry_date: datetime!(2030-06-30 0:00 UTC),
            cvv: "715".to_string(),
        }];
        let binary = vec![BinaryEntry {
            id: uuid!("00000000-0000-0000-0000-000000000003"),
            filename: None,
            bytes: b"blob".to_vec(),
        }];

        let archive_bytes = build_archive(&credentials, &cards, &binary)?;
        let mut archive = ZipArchive::new(std::io::Cursor::new(archive_bytes.clone()))?;

        assert_eq!(archive.len(), 3);
        assert_eq!(archive.by_index(0)?.name(), "credentials.json");
        assert_eq!(archive.by_index(1)?.name(), "credit_cards.json");
        assert_eq!(
            archive.by_index(2)?.name(),
            "bin_data_00000000-0000-0000-0000-000000000003"
        );

        let mut blob = Vec::new();
        archive.by_index(2)?.read_to_end(&mut blob)?;
        assert_eq!(blob, b"blob".to_vec());

        // Identical inputs produce identical archive bytes.
        assert_eq!(build_archive(&credentials, &cards, &binary)?, archive_bytes);

        Ok(())
    }
}
