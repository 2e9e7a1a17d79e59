use anyhow::Context;
use district_toolkit::analysis::correlation::{AgeGroup, PriceCorrelations};
use district_toolkit::analysis::summary::{notable_districts, render_table};
use district_toolkit::analysis::trend::Trendline;
use district_toolkit::config::Config;
use district_toolkit::data::cache::MergedTableCache;
use district_toolkit::data::export::write_merged_csv;
use district_toolkit::DataMerger;
use ndarray::Array1;
use std::env;
use std::path::Path;

const CONFIG_PATH: &str = "config/dashboard.yaml";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Load configuration, falling back to built-in defaults
    let mut config = if Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load {}", CONFIG_PATH))?
    } else {
        log::info!("{} not found, using defaults", CONFIG_PATH);
        Config::default()
    };

    // Population file from command line overrides the config
    if let Some(path) = env::args().nth(1) {
        config.source.path = path.into();
    }
    let output_path = env::args().nth(2);

    println!("Loading population data from: {}", config.source.path.display());
    let cache = MergedTableCache::for_merger(DataMerger::from_config(&config));
    let outcome = cache.get_or_compute();

    if let Some(diagnostic) = &outcome.diagnostic {
        println!("{}", diagnostic);
    }
    if outcome.is_empty() {
        println!("데이터 로드 실패. data 폴더를 확인해주세요.");
        return Ok(());
    }
    let records = &outcome.records;
    println!("Merged {} districts", records.len());

    println!("\n=== 연령대별 집값과의 상관계수 ===");
    let correlations = PriceCorrelations::compute(records);
    for (group, corr) in &correlations.by_age_group {
        println!("{:<24} {:>6.2}  ({})", group.label(), corr, group.description());
    }
    match correlations.strongest() {
        Some((group, _)) => {
            println!("\n가장 강력한 요인: {}", group.label());
            if group == AgeGroup::Adolescent {
                println!("중고등학생 비율이 높은 곳의 집값이 더 높습니다: 실거주 수요가 고등학교 학군을 따라 이동합니다.");
            } else {
                println!("연령대별 차이가 크지 않거나 다른 요인이 작용하고 있습니다.");
            }
        }
        None => println!("\n상관계수를 계산할 수 없습니다."),
    }

    let price: Array1<f64> = records.iter().map(|r| r.price as f64).collect();
    let ratio_adol: Array1<f64> = records.iter().map(|r| r.ratio_adol).collect();
    if let Some(fit) = Trendline::fit(ratio_adol.view(), price.view()) {
        println!(
            "입시생 비율 추세선: price = {:.1} + {:.1} × ratio_adol (R² = {:.3})",
            fit.intercept, fit.slope, fit.r_squared
        );
    }

    println!("\n=== 학원 인프라 효과 ===");
    println!("상관계수 (학원-집값): {:.2}", correlations.academy);
    let academies: Array1<f64> = records.iter().map(|r| r.academy_count as f64).collect();
    if let Some(fit) = Trendline::fit(academies.view(), price.view()) {
        println!(
            "학원 수 추세선: price = {:.1} + {:.2} × academy_count (R² = {:.3})",
            fit.intercept, fit.slope, fit.r_squared
        );
    }
    let notable: Vec<_> = notable_districts(records, &config.analysis)
        .iter()
        .map(|r| r.region.as_str())
        .collect();
    println!("주요 자치구: {}", notable.join(", "));

    println!("\n=== 종합 데이터 ===");
    print!("{}", render_table(records));

    if let Some(path) = output_path {
        write_merged_csv(&path, records).with_context(|| format!("Failed to write {}", path))?;
        println!("\nWrote merged table to {}", path);
    }

    Ok(())
}
