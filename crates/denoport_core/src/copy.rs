use anyhow::{Result, anyhow};
use log::{debug, error};
use rayon::prelude::*;
use std::fs;

use crate::{paths::join, types::CopyFile};

/// Copies every configured auxiliary file into the output tree. Copies run
/// in parallel; every failure is collected and reported in one aggregate
/// error rather than stopping at the first.
pub fn copy_file_list(project_root: &str, output_root: &str, files: &[CopyFile]) -> Result<()> {
    let failures: Vec<String> = files
        .par_iter()
        .filter_map(|file| {
            let from = join(&[project_root, &file.from]);
            let to = join(&[output_root, &file.to]);
            debug!("Copying {} to {}", from, to);
            match fs::copy(&from, &to) {
                Ok(_) => None,
                Err(e) => {
                    error!("Error copying {} to {}: {}", from, to, e);
                    Some(format!("{} -> {}: {}", from, to, e))
                }
            }
        })
        .collect();

    if failures.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("{} file copies failed: {}", failures.len(), failures.join("; ")))
    }
}
