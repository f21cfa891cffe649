use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_log_config::PathManager;
use movie_log_core::ProfileCache;

pub async fn run_clear(all: bool, cache: bool, credentials: bool, output: &Output) -> Result<()> {
    if !all && !cache && !credentials {
        output.warn("Nothing to clear: pass --cache, --credentials, or --all");
        return Ok(());
    }

    let path_manager = PathManager::default();

    if all || cache {
        let profile_cache = ProfileCache::new(&path_manager)
            .map_err(|e| eyre!("Failed to open profile cache: {}", e))?;
        profile_cache
            .clear()
            .map_err(|e| eyre!("Failed to clear profile cache: {}", e))?;
        output.success("Cleared profile cache");
    }

    if all || credentials {
        let credentials_file = path_manager.credentials_file();
        if credentials_file.exists() {
            std::fs::remove_file(&credentials_file)
                .map_err(|e| eyre!("Failed to remove credentials: {}", e))?;
            output.success("Cleared stored credentials");
        } else {
            output.info("No stored credentials");
        }
    }

    Ok(())
}
