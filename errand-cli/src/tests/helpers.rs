//! Test helpers for laying out request files and stub collaborators.

use std::cell::Cell;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use errand_core::test_support::{EuclideanOracle, MemoryDirectory};
use errand_core::{
    BranchDirectory, BranchQuery, DirectoryError, DistanceOracle, Point, RouteRequest,
};
use geo::Coord;
use tempfile::TempDir;

use crate::CliError;
use crate::plan::{PlanConfig, PlanServices};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Create a temporary directory and the request path inside it.
pub(super) fn request_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

pub(super) fn write_request(path: &Utf8Path, request: &RouteRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialise request");
    write_utf8(path, payload.as_bytes());
}

/// Services answering from straight-line distances and an in-memory
/// branch table.
#[derive(Debug, Default)]
pub(super) struct StubPlanServices {
    directory: Arc<MemoryDirectory>,
    directories_built: Cell<usize>,
}

impl StubPlanServices {
    fn map_directory(self, update: impl FnOnce(MemoryDirectory) -> MemoryDirectory) -> Self {
        let inner = Arc::try_unwrap(self.directory)
            .unwrap_or_else(|_| panic!("directory configured after it was shared"));
        Self {
            directory: Arc::new(update(inner)),
            directories_built: self.directories_built,
        }
    }

    pub(super) fn with_branches(self, brand: &str, points: Vec<Point>) -> Self {
        self.map_directory(|directory| directory.with_branches(brand, points))
    }

    pub(super) fn with_directory_error(self, error: DirectoryError) -> Self {
        self.map_directory(|directory| directory.with_error(error))
    }

    pub(super) fn directories_built(&self) -> usize {
        self.directories_built.get()
    }

    /// Search centres the directory has been queried with.
    pub(super) fn centres(&self) -> Vec<Coord<f64>> {
        self.directory.centres()
    }
}

/// Hands the stub's directory to the planner while the test keeps a handle.
struct SharedDirectory(Arc<MemoryDirectory>);

impl BranchDirectory for SharedDirectory {
    fn find_branches(&self, query: &BranchQuery) -> Result<Vec<Point>, DirectoryError> {
        self.0.find_branches(query)
    }
}

impl PlanServices for StubPlanServices {
    fn oracle(
        &self,
        _config: &PlanConfig,
    ) -> Result<Box<dyn DistanceOracle + Send + Sync>, CliError> {
        Ok(Box::new(EuclideanOracle))
    }

    fn directory(&self, _config: &PlanConfig) -> Result<Box<dyn BranchDirectory>, CliError> {
        self.directories_built.set(self.directories_built.get() + 1);
        Ok(Box::new(SharedDirectory(Arc::clone(&self.directory))))
    }
}
