use camino::Utf8Path;
use colored::Colorize;
use mcpack_merge::{is_valid_pack, PackInfo};
use miette::Result;

use crate::errors::CliError;
use crate::println_pad;

pub struct InfoPackArgs {
    pub path: String,
}

pub fn info_pack(args: InfoPackArgs) -> Result<()> {
    let path = Utf8Path::new(&args.path);
    if !is_valid_pack(path) {
        return Err(CliError::InvalidPack {
            path: path.to_owned(),
        }
        .into());
    }

    let pack = PackInfo::load(path);

    println_pad!(
        "{} {}",
        "📦 Pack:".bright_blue().bold(),
        pack.name.bright_cyan().bold()
    );
    println_pad!(
        "{} {}",
        "🏷️ Format:".bright_green(),
        pack.pack_format
            .map_or_else(|| "?".to_string(), |v| v.to_string())
            .bright_white()
            .bold()
    );
    println_pad!(
        "{} {}",
        "📝 Description:".bright_yellow(),
        pack.description
            .unwrap_or_else(|| "No description".to_string())
            .bright_white()
    );
    println_pad!(
        "{} {}",
        "🖼️ Icon:".bright_magenta(),
        if pack.has_icon {
            "pack.png present".bright_white()
        } else {
            "none".dimmed()
        }
    );

    Ok(())
}
