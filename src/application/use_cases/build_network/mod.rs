use crate::application::dto::{NetworkRequest, NetworkResponse};
use crate::application::use_cases::{DependencyResolver, VulnerabilityAnnotator};
use crate::package_network::domain::{Dependency, Manifest, NetworkLevel, Package, PackageNetwork};
use crate::package_network::services::{ClaimedPackages, MetadataGenerator, SeenDependencies};
use crate::ports::inbound::NetworkBuildPort;
use crate::ports::outbound::{
    ManifestParser, ManifestReader, ProgressReporter, VulnerabilityRepository,
};
use crate::shared::error::{BuildStage, NetworkError};
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// BuildNetworkUseCase - Core use case for package network construction
///
/// This use case orchestrates the breadth-first build using generic
/// dependency injection for all infrastructure dependencies. Claimed and
/// seen sets are created inside every build, so one instance can serve any
/// number of builds.
///
/// # Type Parameters
/// * `MR` - ManifestReader implementation
/// * `MP` - ManifestParser implementation
/// * `VR` - VulnerabilityRepository implementation (optional)
/// * `PR` - ProgressReporter implementation
pub struct BuildNetworkUseCase<MR, MP, VR, PR>
where
    VR: VulnerabilityRepository,
{
    manifest_reader: MR,
    manifest_parser: MP,
    resolver: DependencyResolver,
    annotator: Option<VulnerabilityAnnotator<VR>>,
    progress_reporter: PR,
}

impl<MR, MP, VR, PR> BuildNetworkUseCase<MR, MP, VR, PR>
where
    MR: ManifestReader,
    MP: ManifestParser,
    VR: VulnerabilityRepository,
    PR: ProgressReporter,
{
    /// Creates a new BuildNetworkUseCase with injected dependencies
    ///
    /// Passing `None` as the annotator disables vulnerability lookups.
    pub fn new(
        manifest_reader: MR,
        manifest_parser: MP,
        resolver: DependencyResolver,
        annotator: Option<VulnerabilityAnnotator<VR>>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            manifest_reader,
            manifest_parser,
            resolver,
            annotator,
            progress_reporter,
        }
    }

    /// Executes the full use case: read the manifest, build, describe the build
    ///
    /// # Errors
    /// Returns `NetworkCreationFailed` naming the stage that failed
    pub async fn execute(&self, request: NetworkRequest) -> Result<NetworkResponse> {
        self.progress_reporter.report(&format!(
            "📖 Loading manifest from: {}",
            request.manifest_path.display()
        ));

        let manifest = self
            .manifest_reader
            .read_manifest(&request.manifest_path)
            .map_err(|e| NetworkError::creation_failed(BuildStage::ReadManifest, e))?;

        let network = self.build(&manifest, request.max_levels).await?;
        let metadata = MetadataGenerator::generate_default_metadata(request.max_levels);

        self.progress_reporter.report_completion(&format!(
            "✅ Network complete: {} level(s), {} package(s), {} dependencies",
            network.level_count(),
            network.total_package_count(),
            network.total_dependency_count()
        ));

        Ok(NetworkResponse::new(network, metadata))
    }

    /// Builds the network for an already loaded manifest
    ///
    /// # Errors
    /// Returns `NetworkCreationFailed` naming the stage that failed. No
    /// partial network is ever returned.
    pub async fn build(&self, manifest: &Manifest, max_levels: usize) -> Result<PackageNetwork> {
        let mut claimed = ClaimedPackages::new();
        let mut seen = SeenDependencies::new();

        let declared = self
            .manifest_parser
            .parse(manifest)
            .map_err(|e| NetworkError::creation_failed(BuildStage::ParseManifest, e))?;

        let root = Package::root();
        claimed.claim_new(vec![root.clone()]);

        if declared.is_empty() {
            self.progress_reporter
                .report("📭 Manifest declares no packages");
            return self.finish(vec![NetworkLevel::new(vec![root], vec![])]);
        }

        let level0 = self
            .seed(root, declared, &mut claimed, &mut seen)
            .await
            .map_err(|e| NetworkError::creation_failed(BuildStage::Seed, e))?;
        let mut levels = vec![level0];

        for index in 1..max_levels {
            let Some(previous) = levels.last() else {
                break;
            };
            let frontier = previous.non_root_packages();
            if frontier.is_empty() {
                break;
            }

            let next = self
                .expand(index, &frontier, &mut claimed, &mut seen)
                .await
                .map_err(|e| NetworkError::creation_failed(BuildStage::Resolve { level: index }, e))?;

            match next {
                Some(level) => levels.push(level),
                None => break,
            }
        }

        self.finish(levels)
    }

    /// Level 0: the root followed by every first-seen declared package
    async fn seed(
        &self,
        root: Package,
        declared: Vec<Package>,
        claimed: &mut ClaimedPackages,
        seen: &mut SeenDependencies,
    ) -> Result<NetworkLevel> {
        let declared_count = declared.len();
        let packages = claimed.claim_new(declared);
        if packages.len() < declared_count {
            tracing::debug!(
                dropped = declared_count - packages.len(),
                "Dropped duplicate manifest declarations"
            );
        }
        self.progress_reporter
            .report(&format!("✅ Detected {} declared package(s)", packages.len()));

        let packages = self.annotate(packages).await;
        let edges = packages
            .iter()
            .map(|package| Dependency::new(root.clone(), package.clone()))
            .collect::<Result<Vec<_>>>()?;
        seen.mark_seen(&edges);

        let mut level_packages = Vec::with_capacity(packages.len() + 1);
        level_packages.push(root);
        level_packages.extend(packages);
        Ok(NetworkLevel::new(level_packages, edges))
    }

    /// Resolves one more level from the previous level's packages
    ///
    /// Returns `None` when the level would be empty, which ends the build.
    async fn expand(
        &self,
        index: usize,
        frontier: &[Package],
        claimed: &mut ClaimedPackages,
        seen: &mut SeenDependencies,
    ) -> Result<Option<NetworkLevel>> {
        self.progress_reporter.report(&format!(
            "🔍 Resolving level {} from {} package(s)...",
            index,
            frontier.len()
        ));

        let resolved = self
            .resolver
            .resolve_with_progress(frontier, Some(&self.progress_reporter as &dyn ProgressReporter))
            .await?;

        let fresh = seen.retain_unseen(resolved);
        if fresh.is_empty() {
            tracing::debug!(level = index, "No new dependencies; stopping");
            return Ok(None);
        }

        let targets: Vec<Package> = fresh.iter().map(|edge| edge.to().clone()).collect();
        let new_packages = claimed.claim_new(targets);
        if new_packages.is_empty() {
            tracing::debug!(level = index, "All dependencies already placed; stopping");
            return Ok(None);
        }

        // Edges into packages owned by an earlier level are dropped
        let own_keys: std::collections::HashSet<_> = new_packages.iter().map(|p| p.key()).collect();
        let edges: Vec<Dependency> = fresh
            .into_iter()
            .filter(|edge| own_keys.contains(&edge.to().key()))
            .collect();

        let annotated = self.annotate(new_packages).await;
        let by_key: HashMap<_, _> = annotated.iter().map(|p| (p.key(), p)).collect();
        let edges = edges
            .iter()
            .map(|edge| match by_key.get(&edge.to().key()) {
                Some(target) => edge.with_target((*target).clone()),
                None => Ok(edge.clone()),
            })
            .collect::<Result<Vec<_>>>()?;

        self.progress_reporter.report(&format!(
            "   - Level {}: {} package(s), {} dependencies",
            index,
            annotated.len(),
            edges.len()
        ));

        Ok(Some(NetworkLevel::new(annotated, edges)))
    }

    async fn annotate(&self, packages: Vec<Package>) -> Vec<Package> {
        match &self.annotator {
            Some(annotator) => {
                self.progress_reporter
                    .report("🔐 Checking for vulnerabilities...");
                annotator.annotate(packages).await
            }
            None => packages,
        }
    }

    fn finish(&self, levels: Vec<NetworkLevel>) -> Result<PackageNetwork> {
        let network = PackageNetwork::new(levels);
        network
            .validate()
            .map_err(|e| NetworkError::creation_failed(BuildStage::Validate, e))?;
        Ok(network)
    }
}

#[async_trait]
impl<MR, MP, VR, PR> NetworkBuildPort for BuildNetworkUseCase<MR, MP, VR, PR>
where
    MR: ManifestReader + Send + Sync,
    MP: ManifestParser + Send + Sync,
    VR: VulnerabilityRepository,
    PR: ProgressReporter,
{
    async fn build_network(&self, manifest: &Manifest, max_levels: usize) -> Result<PackageNetwork> {
        self.build(manifest, max_levels).await
    }
}
