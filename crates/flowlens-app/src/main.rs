//! # flowlens-app
//!
//! flowlens CLI 바이너리 진입점.
//! 설정을 읽고 JSON 세션 저장소를 연결해 기간 패턴 분석 결과를 JSON으로 출력한다.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Parser;
use flowlens_analysis::PatternAnalysisEngine;
use flowlens_core::config::AnalysisConfig;
use flowlens_core::config_manager::ConfigManager;
use flowlens_storage::JsonSessionStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 기본 분석 기간 (일)
const DEFAULT_RANGE_DAYS: i64 = 30;

/// flowlens 패턴 분석기
///
/// 분류된 집중 세션 기록에서 집중/방해 패턴, 생산성 추세, 개인화 인사이트를 도출
#[derive(Parser, Debug)]
#[command(name = "flowlens")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 세션 JSON 파일 경로
    #[arg(long, short = 's')]
    sessions: PathBuf,

    /// 분석 시작 (RFC3339 또는 YYYY-MM-DD, 기본: 종료 30일 전)
    #[arg(long)]
    from: Option<String>,

    /// 분석 종료, 미포함 (RFC3339 또는 YYYY-MM-DD, 기본: 현재)
    #[arg(long)]
    to: Option<String>,

    /// 분석 설정 파일 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "warn")]
    log_level: String,

    /// 들여쓰기된 JSON 출력
    #[arg(long)]
    pretty: bool,
}

/// 날짜 인자 파싱. 날짜만 주면 UTC 자정
fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("날짜 형식 오류: {value} (RFC3339 또는 YYYY-MM-DD)"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("날짜 변환 실패: {value}"))
}

/// 분석 기간 결정
fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let end = to.map(parse_instant).transpose()?.unwrap_or(now);
    let start = from
        .map(parse_instant)
        .transpose()?
        .unwrap_or(end - Duration::days(DEFAULT_RANGE_DAYS));
    Ok((start, end))
}

/// 분석 설정 로드
///
/// 경로를 지정하면 실패 시 종료, 기본 경로 실패는 기본 설정으로 대체.
fn load_config(path: Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let manager = ConfigManager::with_path(path.clone())
                .with_context(|| format!("설정 로드 실패: {}", path.display()))?;
            Ok(manager.get())
        }
        None => match ConfigManager::new() {
            Ok(manager) => {
                info!("설정 파일: {}", manager.config_path().display());
                Ok(manager.get())
            }
            Err(e) => {
                warn!("설정 관리자 초기화 실패, 기본 설정 사용: {e}");
                Ok(AnalysisConfig::default())
            }
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG가 있으면 우선. 로그는 stderr로 보내 stdout JSON과 분리
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = load_config(args.config)?;
    config.validate().context("분석 설정 검증 실패")?;

    let (start, end) = resolve_range(args.from.as_deref(), args.to.as_deref(), Utc::now())?;
    info!("분석 기간: {start} ~ {end}");

    let store = Arc::new(JsonSessionStore::new(args.sessions));
    info!("세션 파일: {}", store.path().display());
    let engine = PatternAnalysisEngine::new(store, config);
    let analysis = engine
        .analyze_patterns(start, end)
        .await
        .context("패턴 분석 실패")?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&analysis)?
    } else {
        serde_json::to_string(&analysis)?
    };
    println!("{output}");

    Ok(())
}
