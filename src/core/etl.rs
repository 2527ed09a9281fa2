use crate::core::Pipeline;
use crate::domain::model::LoadReport;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

/// Runs a pipeline's phases strictly in order: extract, transform, load.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<LoadReport> {
        tracing::info!("Starting photo collection");
        self.monitor.log_stats("Start");

        let extraction = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} items ({} barcodes)",
            extraction.items.len(),
            extraction.barcodes.len()
        );
        self.monitor.log_stats("Extract");

        let tree = self.pipeline.transform(extraction).await?;
        self.monitor.log_stats("Transform");

        let report = self.pipeline.load(tree).await?;
        tracing::info!(
            "Copied {} files into {} directories under {}",
            report.files_copied,
            report.directories_created,
            report.output_root.display()
        );
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(report)
    }
}
