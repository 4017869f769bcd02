use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wiper_lookup::cli::{Cli, Commands};
use wiper_lookup::config::Config;
use wiper_lookup::{export, interactive, report, LookupService};
use wiper_lookup_common::QueryFilters;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("设置文件读取失败")?;
    let service = LookupService::from_config(&config, &cli.data, cli.sheet.clone());

    match cli.command {
        Commands::Search { term, brand, connector, limit, json, no_strip_brand } => {
            let service = if no_strip_brand {
                service.with_strip_brand(false)
            } else {
                service
            };
            let filters = QueryFilters {
                brand,
                connector_type: connector,
            };
            let results = service.search(&term, filters)?;

            if json {
                println!("{}", results.to_json()?);
            } else {
                if service.dataset()?.is_fallback_sample() {
                    println!("{}\n", report::FALLBACK_WARNING);
                }
                let limit = limit.unwrap_or(config.display_limit);
                print!("{}", report::format_results(&results, &term, limit));
            }
        }

        Commands::Interactive => {
            println!("🔍 wiper-lookup - 雨刷查询\n");
            interactive::run(&service, config.display_limit)?;
        }

        Commands::Info => {
            let dataset = service.dataset()?;
            let key = service.store().cache_key();
            print!("{}", report::format_dataset_info(&dataset, key.as_ref()));
        }

        Commands::Values { field } => {
            let dataset = service.dataset()?;
            if !dataset.schema().has(field) {
                println!("数据中没有「{}」列", field.label());
                return Ok(());
            }
            let values = dataset.distinct_values(field);
            println!("{} ({}种):", field.label(), values.len());
            for value in values {
                println!("  {}", value);
            }
        }

        Commands::Import { file } => {
            let (target, dataset) = service
                .store()
                .import(&file)
                .with_context(|| format!("导入失败: {}", file.display()))?;
            println!("✔ 已导入 {} 条记录 → {}", dataset.len(), target.display());
        }

        Commands::Save { output } => {
            let dataset = service.dataset()?;
            let path = export::save_dataset(&dataset, &output)?;
            println!("✔ 已保存: {}", path.display());
        }

        Commands::Log { limit, top } => {
            let log = service.log();
            if log.path().is_none() {
                println!("未设置查询日志路径（wiper-lookup config --log-path <文件>）");
                return Ok(());
            }

            println!("最近查询:");
            for entry in log.recent(limit) {
                println!("  {}  {} ({}条)", entry.timestamp, entry.term, entry.result_count);
            }

            if let Some(n) = top {
                println!("\n常用查询:");
                for (term, count) in log.top_terms(n) {
                    println!("  {:>4}  {}", count, term);
                }
            }
        }

        Commands::Config { add_source, sheet, log_path, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(source) = add_source {
                if config.add_source(source.clone()) {
                    println!("✔ 已添加数据来源: {}", source);
                    changed = true;
                } else {
                    println!("数据来源已存在: {}", source);
                }
            }

            if let Some(sheet) = sheet {
                println!("✔ 工作表: {}", sheet);
                config.sheet = Some(sheet).filter(|s| !s.trim().is_empty());
                changed = true;
            }

            if let Some(path) = log_path {
                println!("✔ 查询日志: {}", path.display());
                config.query_log_path = Some(path);
                changed = true;
            }

            if changed {
                config.save().context("设置保存失败")?;
            }

            if show || !changed {
                println!("设置:");
                println!("  数据来源: {}", config.sources.join(", "));
                println!("  工作表: {}", config.sheet.as_deref().unwrap_or("(第一个)"));
                println!(
                    "  查询日志: {}",
                    config
                        .query_log_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(未设置)".into())
                );
                println!("  显示条数: {}", config.display_limit);
                println!("  去除品牌: {}", if config.strip_brand { "是" } else { "否" });
            }
        }
    }

    Ok(())
}
