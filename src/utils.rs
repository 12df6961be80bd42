use std::{path::Path, str::FromStr};

use alloy::signers::local::PrivateKeySigner;

use crate::{
    constants::{ACCOUNTS_FILE_PATH, PROXIES_FILE_PATH},
    error::{Error, Result},
};

/// Non-empty lines of a text file, trimmed, in file order.
pub async fn read_file_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let contents = tokio::fs::read_to_string(path).await?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

pub async fn read_private_keys() -> Result<Vec<PrivateKeySigner>> {
    read_file_lines(ACCOUNTS_FILE_PATH)
        .await?
        .iter()
        .map(|pk| {
            // LocalSignerError does not echo the key material back
            PrivateKeySigner::from_str(pk)
                .map_err(|e| Error::Config(format!("invalid private key in accounts file: {e}")))
        })
        .collect()
}

pub async fn read_proxies() -> Result<Vec<String>> {
    read_file_lines(PROXIES_FILE_PATH).await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn write_fixture(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn lines_are_trimmed_and_blanks_dropped() {
        let path = write_fixture(
            "cyber_checkin_lines",
            "  first \n\nsecond\n\t\nthird  \n\n",
        )
        .await;

        let lines = read_file_lines(&path).await.unwrap();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn empty_file_yields_empty_sequence() {
        let path = write_fixture("cyber_checkin_empty", "").await;

        let lines = read_file_lines(&path).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("cyber_checkin_does_not_exist");

        let err = read_file_lines(&path).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
