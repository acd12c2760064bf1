use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::report_format::ReportFormat;
use crate::errors::{EnhancerError, EnhancerResult};
use crate::helpers::path_safety;
use crate::logger::status_spinner::StatusSpinner;
use crate::services::ai_analyzer::AiAnalyzer;
use crate::services::file_walker;
use crate::services::model_catalog;
use crate::services::ollama::OllamaClient;
use crate::services::process_runner::ProcessRunner;
use crate::services::request_builder::RequestBuilder;
use crate::services::scheduler::{AnalysisEvent, AnalysisScheduler, SchedulerConfig};
use crate::services::validator::{self, ValidationOutcome};
use crate::services::watcher::{self, WatchEvent};
use crate::services::{code_scanner, metrics, report_writer};
use crate::structs::analysis_request::AnalysisOptions;
use crate::structs::config::config::Config;
use crate::structs::file_report::FileReport;
use crate::config::constants::language_for_extension;
use crate::helpers::format::{format_file_size, truncate};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> EnhancerResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command().await,
            Commands::Analyze {
                path,
                model,
                recursive,
                output,
                format,
                no_ai,
                no_security_scan,
                no_performance_scan,
            } => {
                self.analyze_command(
                    path,
                    model,
                    recursive,
                    output,
                    format,
                    no_ai,
                    no_security_scan,
                    no_performance_scan,
                )
                .await
            }
            Commands::Watch {
                path,
                model,
                delay_ms,
            } => self.watch_command(path, model, delay_ms).await,
            Commands::ListModels { installed } => self.list_models_command(installed).await,
            Commands::Validate => self.validate_command().await,
        };

        if let Some(start) = self.start_time {
            log::debug!("⏱️ command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    async fn init_command(&self) -> EnhancerResult<()> {
        log::info!("🚀 Initializing enhancer configuration...");
        let path = ConfigManager::create_sample_config()?;
        log::info!("✅ Configuration file created at {}", path.display());
        log::info!("🔧 Run 'enhancer validate' after editing it.");
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn analyze_command(
        &self,
        path: PathBuf,
        model: Option<String>,
        recursive: bool,
        output: Option<PathBuf>,
        format: ReportFormat,
        no_ai: bool,
        no_security_scan: bool,
        no_performance_scan: bool,
    ) -> EnhancerResult<()> {
        let config = ConfigManager::load()?;
        let options = AnalysisOptions {
            security_scan: config.analysis.security_scan && !no_security_scan,
            performance_scan: config.analysis.performance_scan && !no_performance_scan,
        };

        let safe_dirs = safe_dirs(&config);
        path_safety::ensure_safe(&path, &safe_dirs)?;

        let ai = if no_ai {
            None
        } else {
            Some(Arc::new(AiAnalyzer::new(&config.ai)?))
        };

        if path.is_dir() {
            self.analyze_directory(path, &config, model, recursive, options, ai, format)
                .await
        } else {
            let report =
                analyze_file(&path, &config, model.as_deref(), options, ai.as_deref(), false)
                    .await?;
            let rendered = report_writer::render(&report, format);
            print!("{}", rendered);

            if let Some(output) = output {
                std::fs::write(&output, &rendered)?;
                log::info!("💾 Report saved to {}", output.display());
            }
            Ok(())
        }
    }

    #[allow(clippy::too_many_arguments)]
    async fn analyze_directory(
        &self,
        path: PathBuf,
        config: &Config,
        model: Option<String>,
        recursive: bool,
        options: AnalysisOptions,
        ai: Option<Arc<AiAnalyzer>>,
        format: ReportFormat,
    ) -> EnhancerResult<()> {
        let files = file_walker::collect_source_files(&path, recursive);
        if files.is_empty() {
            log::warn!("⚠️ No analyzable source files under {}", path.display());
            return Ok(());
        }

        log::info!(
            "🔍 Analyzing {} files with {} workers...",
            files.len(),
            config.analysis.max_workers
        );

        let semaphore = Arc::new(Semaphore::new(config.analysis.max_workers.max(1)));
        let mut handles = Vec::with_capacity(files.len());

        for file in files {
            let semaphore = Arc::clone(&semaphore);
            let config = config.clone();
            let model = model.clone();
            let ai = ai.clone();
            handles.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("semaphore closed");
                let report =
                    analyze_file(&file, &config, model.as_deref(), options, ai.as_deref(), true)
                        .await;
                (file, report)
            }));
        }

        let mut analyzed = 0usize;
        let mut skipped = 0usize;
        let mut total_findings = 0usize;

        for joined in futures::future::join_all(handles).await {
            let (file, report) = joined
                .map_err(|e| EnhancerError::system("joining analysis task", &e.to_string()))?;

            match report {
                Ok(report) => {
                    analyzed += 1;
                    total_findings += report.findings.len();
                    print!("{}", report_writer::render(&report, format));
                }
                Err(e) => {
                    skipped += 1;
                    log::warn!("⏭️ skipping {}: {}", file.display(), e);
                }
            }
        }

        log::info!(
            "📊 Analyzed {} files ({} skipped), {} findings",
            analyzed,
            skipped,
            total_findings
        );
        Ok(())
    }

    async fn watch_command(
        &self,
        path: PathBuf,
        model: Option<String>,
        delay_ms: Option<u64>,
    ) -> EnhancerResult<()> {
        let config = ConfigManager::load()?;
        let safe_dirs = safe_dirs(&config);
        path_safety::ensure_safe(&path, &safe_dirs)?;

        let debounce = Duration::from_millis(delay_ms.unwrap_or(config.analysis.delay_ms));
        let scheduler_config = SchedulerConfig {
            debounce,
            run_timeout: Duration::from_secs(config.analysis.timeout_secs),
            model,
            options: AnalysisOptions {
                security_scan: config.analysis.security_scan,
                performance_scan: config.analysis.performance_scan,
            },
        };

        let builder = RequestBuilder::from_config(&config.ai, &config.analyzer)?;
        let (scheduler, mut results) = AnalysisScheduler::new(
            scheduler_config,
            config.analysis.clone(),
            builder,
            Arc::new(ProcessRunner::new()),
        );

        let (watch_tx, mut watch_rx) = tokio::sync::mpsc::unbounded_channel();
        let _watcher = watcher::watch_path(&path, watch_tx)?;

        log::info!(
            "👀 Watching {} (debounce {} ms, Ctrl+C to stop)",
            path.display(),
            debounce.as_millis()
        );

        // A watched file gets an immediate first pass; edits then debounce.
        if path.is_file() {
            match tokio::fs::read(&path).await {
                Ok(content) => scheduler.analyze_now(&path, content),
                Err(e) => log::warn!("⚠️ cannot read {}: {}", path.display(), e),
            }
        }

        loop {
            tokio::select! {
                Some(event) = watch_rx.recv() => {
                    match event {
                        WatchEvent::Created(file) => {
                            if let Ok(content) = tokio::fs::read(&file).await {
                                scheduler.analyze_now(&file, content);
                            }
                        }
                        WatchEvent::Modified(file) => {
                            match tokio::fs::read(&file).await {
                                Ok(content) => scheduler.notify_edit(&file, content),
                                Err(e) => log::warn!("⚠️ cannot read {}: {}", file.display(), e),
                            }
                        }
                    }
                }
                Some(event) = results.recv() => {
                    print_analysis_event(&event);
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("🛑 Stopping watch.");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn list_models_command(&self, installed: bool) -> EnhancerResult<()> {
        if installed {
            let config = ConfigManager::load()?;
            let client = OllamaClient::new(&config.ai)?;
            let models = client.list_local_models().await?;

            if models.is_empty() {
                log::info!("⚠️ No models installed on the local Ollama daemon.");
                return Ok(());
            }

            log::info!("📋 Installed Ollama models:");
            for model in &models {
                log::info!("   - {} ({})", model.name, format_file_size(model.size));
            }
            log::info!("📊 Total: {} models", models.len());
            return Ok(());
        }

        log::info!("📋 Known models by provider:");
        for (provider, models) in model_catalog::PROVIDERS {
            log::info!("\n{} ({} models):", provider, models.len());
            for model in *models {
                log::info!("   - {}", model);
            }
        }
        log::info!("\n📊 Total: {} models", model_catalog::all_models().len());
        Ok(())
    }

    async fn validate_command(&self) -> EnhancerResult<()> {
        log::info!("🔍 Validating enhancer configuration...");

        let config = ConfigManager::load()?;
        let report = ConfigManager::validate_config(&config);
        report.print_summary();

        if !report.is_valid() {
            return Err(EnhancerError::config(
                "configuration is invalid; fix the errors above",
                None,
            ));
        }

        log::info!(
            "📊 {} models in sequence, default '{}'",
            config.ai.model_sequence.len(),
            config.ai.model_sequence.first().map(String::as_str).unwrap_or("-")
        );
        Ok(())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn safe_dirs(config: &Config) -> Vec<PathBuf> {
    let mut dirs = path_safety::default_safe_dirs();
    dirs.extend(config.analysis.safe_dirs.iter().map(PathBuf::from));
    dirs
}

/// Full analysis of one file: validation, static pass, optional AI pass.
async fn analyze_file(
    path: &Path,
    config: &Config,
    model: Option<&str>,
    options: AnalysisOptions,
    ai: Option<&AiAnalyzer>,
    quiet: bool,
) -> EnhancerResult<FileReport> {
    let content = tokio::fs::read(path).await?;

    if let ValidationOutcome::Rejected(reason) =
        validator::validate(path, &content, &config.analysis)
    {
        return Err(EnhancerError::validation(&path.to_string_lossy(), reason));
    }

    // Validation guarantees UTF-8.
    let text = String::from_utf8(content)
        .map_err(|e| EnhancerError::parse("UTF-8", &e.to_string()))?;

    let language = path
        .extension()
        .and_then(|e| language_for_extension(&e.to_string_lossy()));

    let mut report = FileReport {
        target: path.to_string_lossy().to_string(),
        metrics: metrics::compute_metrics(&text, language),
        findings: code_scanner::scan(&text, &options),
        suggestions: Vec::new(),
        model: None,
    };

    if let Some(ai) = ai {
        let spinner = if quiet {
            None
        } else {
            Some(StatusSpinner::start("Waiting for model response"))
        };

        let analysis = ai.analyze(&text, language, model, &options).await;

        if let Some(spinner) = spinner {
            match &analysis.model {
                Some(model) => spinner.finish(&format!("AI analysis complete ({})", model)).await,
                None => spinner.fail("AI analysis unavailable").await,
            }
        }

        report.findings.extend(analysis.findings);
        report.suggestions = analysis.suggestions;
        report.model = analysis.model;
    }

    Ok(report)
}

fn print_analysis_event(event: &AnalysisEvent) {
    match event {
        AnalysisEvent::Completed {
            target,
            generation,
            result,
        } => {
            let worst = result
                .worst_severity()
                .map(|s| format!(", worst: {}", s.label()))
                .unwrap_or_default();
            log::info!(
                "✅ {} (generation {}): {} findings{}{}",
                target.display(),
                generation,
                result.findings.len(),
                worst,
                if result.degraded { " [degraded]" } else { "" }
            );
            for finding in &result.findings {
                log::info!(
                    "   {} [{}] {} (line {})",
                    finding.severity.emoji(),
                    finding.severity.tag(),
                    truncate(&finding.message, 100),
                    finding.line
                );
            }
        }
        AnalysisEvent::Failed {
            target,
            generation,
            error,
        } => {
            // Transient per-target status; the last good result stays on
            // screen until a newer one replaces it.
            log::error!("❌ {} (generation {}): {}", target.display(), generation, error);
        }
    }
}
