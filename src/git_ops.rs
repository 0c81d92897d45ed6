use anyhow::{Context, Result};
use git2::{Repository, Signature, Time};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const REMOTE_NAME: &str = "origin";

/// Git operations for committing generated pages
pub struct GitOps {
    repo: Option<Repository>,
}

impl GitOps {
    /// Create a new GitOps instance by detecting if the path is in a git repository
    pub fn new(path: &Path) -> Self {
        let dir = if path.is_file() {
            path.parent().unwrap_or(path).to_path_buf()
        } else {
            path.to_path_buf()
        };

        Self {
            repo: Repository::discover(dir).ok(),
        }
    }

    /// Check if the path is under git version control
    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some()
    }

    /// Stage `paths` and commit them
    ///
    /// Paths that no longer exist are removed from the index. Returns `false`
    /// without committing when the resulting tree equals HEAD's.
    pub fn commit(&self, paths: &[PathBuf], message: &str) -> Result<bool> {
        let Some(repo) = &self.repo else {
            return Ok(false);
        };

        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        let workdir = workdir.canonicalize().unwrap_or_else(|_| workdir.to_path_buf());

        let mut index = repo.index()?;
        for path in paths {
            let relative = Self::relative_path(&workdir, path)?;
            if path.exists() {
                index.add_path(&relative)?;
            } else {
                index.remove_path(&relative)?;
            }
        }
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        // Get the current HEAD commit
        let parent_commit = match repo.head() {
            Ok(head) => {
                let oid = head.target().context("HEAD has no target")?;
                Some(repo.find_commit(oid)?)
            }
            Err(_) => None, // Initial commit
        };

        if let Some(parent) = &parent_commit
            && parent.tree_id() == tree_id
        {
            debug!("generated files unchanged, skipping commit");
            return Ok(false);
        }

        let signature = Self::get_signature(repo)?;
        let parents: Vec<_> = parent_commit.iter().collect();

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        info!(files = paths.len(), "committed: {}", message);
        Ok(true)
    }

    fn relative_path(workdir: &Path, path: &Path) -> Result<PathBuf> {
        // Deleted files cannot be canonicalized, so resolve through the parent.
        let absolute = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => parent
                .canonicalize()
                .map(|p| p.join(name))
                .unwrap_or_else(|_| path.to_path_buf()),
            _ => path.to_path_buf(),
        };
        absolute
            .strip_prefix(workdir)
            .map(Path::to_path_buf)
            .with_context(|| format!("File is not in repository: {}", path.display()))
    }

    /// Push the current branch when an `origin` remote is configured
    pub fn push(&self) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };

        let Ok(mut remote) = repo.find_remote(REMOTE_NAME) else {
            debug!("no '{}' remote, skipping push", REMOTE_NAME);
            return Ok(());
        };

        let head = repo.head().context("Failed to get HEAD")?;
        let branch_name = head
            .shorthand()
            .context("Failed to get branch name")?
            .to_string();

        let refspec = format!("refs/heads/{}", branch_name);
        remote
            .push(&[&refspec], None)
            .with_context(|| format!("Failed to push {} to {}", branch_name, REMOTE_NAME))?;

        Ok(())
    }

    /// Get or create a git signature for commits
    fn get_signature(repo: &Repository) -> Result<Signature<'_>> {
        let config = repo.config()?;

        let name = config
            .get_string("user.name")
            .unwrap_or_else(|_| "foam-streams".to_string());

        let email = config
            .get_string("user.email")
            .unwrap_or_else(|_| "foam-streams@localhost".to_string());

        match Signature::now(&name, &email) {
            Ok(sig) => Ok(sig),
            Err(_) => {
                // Fallback to a fixed time if now() fails (e.g., on some CI systems)
                let time = Time::new(1_700_000_000, 0);
                Signature::new(&name, &email, &time)
                    .context("Failed to create signature with fixed time")
            }
        }
    }

    /// Commit `paths` and push when something was committed
    pub fn sync(&self, paths: &[PathBuf], commit_message: &str) -> Result<()> {
        if !self.is_git_managed() {
            return Ok(());
        }

        let committed = self
            .commit(paths, commit_message)
            .context("Failed to commit changes")?;
        if committed {
            self.push().context("Failed to push changes")?;
        }

        Ok(())
    }
}
