//! Upload → generate lifecycle through the async dashboard facade.

use std::sync::Arc;
use std::time::Duration;

use cafe_recon::app::{
    Dashboard, LifecycleState, PlaceholderIngestor, SimulationConfig, TokioDelay,
};
use cafe_recon::domain::{FileHandle, ReconciliationEngine, ReportPeriod, Source};
use cafe_recon::error::{Error, LifecycleError};
use cafe_recon::testkit::config::dashboard;
use cafe_recon::testkit::domain::files;

#[tokio::test]
async fn generating_with_no_uploads_is_blocked() {
    let dashboard = dashboard(1);

    let err = dashboard.generate().await.unwrap_err();
    assert!(matches!(err, Error::Lifecycle(LifecycleError::NoFiles)));
    assert_eq!(dashboard.lifecycle(), LifecycleState::Empty);
    assert!(dashboard.report().is_none());
}

#[tokio::test]
async fn uploads_from_every_source_feed_the_report() {
    let dashboard = dashboard(2);
    dashboard
        .upload(Source::Pos, vec![FileHandle::new("pos.xlsx")])
        .await
        .unwrap();
    dashboard
        .upload(Source::PlatformA, vec![FileHandle::new("zomato.csv")])
        .await
        .unwrap();
    dashboard
        .upload(Source::PlatformB, vec![FileHandle::new("swiggy.xlsx")])
        .await
        .unwrap();
    assert_eq!(dashboard.lifecycle(), LifecycleState::Ready);

    let report = dashboard.generate().await.unwrap();
    assert!(report.sources.pos.available);
    assert!(report.sources.platform_a.available);
    assert!(report.sources.platform_b.available);
    assert_eq!(report.daily.len(), 7);
    assert_eq!(dashboard.lifecycle(), LifecycleState::Generated);
}

#[tokio::test]
async fn regenerating_replaces_the_report() {
    let dashboard = dashboard(3);
    dashboard.load_files(files(&["pos.xlsx"], &[], &[])).unwrap();

    let first = dashboard.generate().await.unwrap();
    dashboard.set_period(ReportPeriod::Monthly);
    let second = dashboard.generate().await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.daily.len(), 30);
    assert_eq!(dashboard.report().map(|r| r.id), Some(second.id));
}

#[tokio::test]
async fn same_seed_gives_same_figures() {
    let first = dashboard(42);
    let second = dashboard(42);
    for dashboard in [&first, &second] {
        dashboard.load_demo().unwrap();
    }

    let a = first.generate().await.unwrap();
    let b = second.generate().await.unwrap();
    assert_eq!(a.sources, b.sources);
    assert_eq!(a.summary, b.summary);
    assert_eq!(a.daily, b.daily);
}

#[tokio::test]
async fn clear_files_discards_report() {
    let dashboard = dashboard(4);
    dashboard.load_demo().unwrap();
    dashboard.generate().await.unwrap();

    dashboard.clear_files().unwrap();
    assert_eq!(dashboard.lifecycle(), LifecycleState::Empty);
    assert!(dashboard.report().is_none());
    assert_eq!(dashboard.upload_status(Source::Pos), "No files selected");
}

#[tokio::test]
async fn reset_restores_period() {
    let dashboard = dashboard(5);
    dashboard.set_period(ReportPeriod::Daily);
    dashboard.load_demo().unwrap();

    dashboard.reset(ReportPeriod::Weekly).unwrap();
    assert_eq!(dashboard.period(), ReportPeriod::Weekly);
    assert_eq!(dashboard.lifecycle(), LifecycleState::Empty);
}

#[tokio::test]
async fn demo_upload_status_lists_files() {
    let dashboard = dashboard(6);
    dashboard.load_demo().unwrap();

    assert_eq!(
        dashboard.upload_status(Source::Pos),
        "1 file(s): demo_pos_data.xlsx"
    );
    assert!(dashboard
        .upload_status(Source::PlatformA)
        .starts_with("2 file(s): "));
}

#[tokio::test(start_paused = true)]
async fn second_generation_is_rejected_while_first_runs() {
    let dashboard = Arc::new(
        Dashboard::builder(ReconciliationEngine::default())
            .simulation(SimulationConfig::default())
            .delay(Arc::new(TokioDelay))
            .ingestor(Box::new(PlaceholderIngestor::seeded(9)))
            .build(),
    );
    dashboard.load_demo().unwrap();

    let running = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(async move { dashboard.generate().await.map(|r| r.id) })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(dashboard.lifecycle(), LifecycleState::Generating);

    let err = dashboard.generate().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Lifecycle(LifecycleError::GenerationInFlight)
    ));
    let err = dashboard
        .upload(Source::Pos, vec![FileHandle::new("late.xlsx")])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Lifecycle(LifecycleError::GenerationInFlight)
    ));

    let id = running.await.unwrap().unwrap();
    assert_eq!(dashboard.report().map(|r| r.id), Some(id));
    assert_eq!(dashboard.lifecycle(), LifecycleState::Generated);
}

#[tokio::test(start_paused = true)]
async fn upload_waits_for_simulated_processing() {
    let dashboard = Dashboard::builder(ReconciliationEngine::default())
        .delay(Arc::new(TokioDelay))
        .seed(10)
        .build();

    let start = tokio::time::Instant::now();
    dashboard
        .upload(Source::PlatformB, vec![FileHandle::new("swiggy.xlsx")])
        .await
        .unwrap();
    assert!(start.elapsed() >= Duration::from_millis(1500));
}
