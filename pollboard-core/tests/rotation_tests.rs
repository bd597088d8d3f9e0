// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::rc::Rc;
use std::time::Duration;

use pollboard_core::{DisplayConfig, RotationController, RotationSettings};
use pollboard_runtime::impls::tokio::TokioTimer;
use pollboard_test_utils::fixtures::completed_polls;
use pollboard_test_utils::{GridCall, RecordingGridView};
use tokio::time::{pause, timeout, Instant};

fn settings() -> RotationSettings {
    let config = DisplayConfig::load().expect("embedded config");
    RotationSettings::from(&config.rotation)
}

fn controller(
    poll_count: u64,
    settings: RotationSettings,
    view: &Rc<RecordingGridView>,
) -> RotationController<Rc<RecordingGridView>> {
    RotationController::new(completed_polls(poll_count), settings, Rc::clone(view))
        .expect("enough polls to rotate")
}

#[test]
fn test_four_or_fewer_polls_do_not_rotate() {
    let view = Rc::new(RecordingGridView::new());

    for count in [0, 1, 4] {
        let rotation =
            RotationController::new(completed_polls(count), settings(), Rc::clone(&view));
        assert!(rotation.is_none(), "{count} polls should not rotate");
    }
    assert!(view.calls().is_empty());
}

#[test]
fn test_zero_page_size_does_not_rotate() {
    let view = Rc::new(RecordingGridView::new());

    let rotation = RotationController::new(
        completed_polls(9),
        RotationSettings {
            polls_per_page: 0,
            ..settings()
        },
        Rc::clone(&view),
    );

    assert!(rotation.is_none());
    assert!(view.calls().is_empty());
}

#[test]
fn test_five_polls_make_two_pages() {
    let view = Rc::new(RecordingGridView::new());

    let rotation = controller(5, settings(), &view);

    assert_eq!(rotation.total_pages(), 2);
    assert_eq!(rotation.current_page(), 0);
    assert_eq!(rotation.poll_count(), 5);
}

#[tokio::test]
async fn test_rotate_once_fades_waits_then_swaps() -> anyhow::Result<()> {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    let mut rotation = controller(9, settings(), &view);
    let started = Instant::now();

    // Act
    let page = rotation.rotate_once(&TokioTimer).await?;

    // Assert
    assert_eq!(page, 1);
    assert!(Instant::now() - started >= Duration::from_millis(300));
    let calls = view.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], GridCall::FadeOut);
    assert!(matches!(calls[1], GridCall::Replace(_)));
    assert_eq!(calls[2], GridCall::CurrentPage(2));
    Ok(())
}

#[tokio::test]
async fn test_second_page_holds_the_next_four_polls() -> anyhow::Result<()> {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    let mut rotation = controller(9, settings(), &view);

    // Act
    rotation.rotate_once(&TokioTimer).await?;

    // Assert
    let html = view.last_html().expect("cards were replaced");
    assert_eq!(html.matches(r#"class="poll-card fade-in""#).count(), 4);
    for n in 4..8 {
        assert!(html.contains(&format!("<h2>Question {n}?</h2>")));
        assert!(html.contains(&format!(r#"data-poll-index="{n}""#)));
    }
    assert!(!html.contains("<h2>Question 3?</h2>"));
    assert!(!html.contains("<h2>Question 8?</h2>"));
    Ok(())
}

#[tokio::test]
async fn test_last_partial_page_then_wrap() -> anyhow::Result<()> {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    let mut rotation = controller(9, settings(), &view);

    // Act
    let pages = vec![
        rotation.rotate_once(&TokioTimer).await?,
        rotation.rotate_once(&TokioTimer).await?,
        rotation.rotate_once(&TokioTimer).await?,
    ];

    // Assert
    assert_eq!(pages, vec![1, 2, 0]);
    assert_eq!(view.pages_shown(), vec![2, 3, 1]);
    let html = view.last_html().expect("cards were replaced");
    assert!(html.contains("<h2>Question 0?</h2>"));
    assert!(html.contains("<h2>Question 3?</h2>"));
    Ok(())
}

#[tokio::test]
async fn test_failed_fade_still_swaps_the_page() -> anyhow::Result<()> {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    view.fail_fade(true);
    let mut rotation = controller(6, settings(), &view);

    // Act
    let page = rotation.rotate_once(&TokioTimer).await?;

    // Assert
    assert_eq!(page, 1);
    assert_eq!(view.fade_count(), 0);
    assert_eq!(view.pages_shown(), vec![2]);
    Ok(())
}

#[tokio::test]
async fn test_failed_swap_is_reported() {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    view.fail_replace(true);
    let mut rotation = controller(6, settings(), &view);

    // Act
    let result = rotation.rotate_once(&TokioTimer).await;

    // Assert
    assert!(result.is_err());
    assert!(view.pages_shown().is_empty());
}

#[tokio::test]
async fn test_start_publishes_page_count_only() -> anyhow::Result<()> {
    // Arrange
    let view = Rc::new(RecordingGridView::new());
    let rotation = controller(9, settings(), &view);

    // Act
    rotation.start()?;

    // Assert
    assert_eq!(view.calls(), vec![GridCall::TotalPages(3)]);
    Ok(())
}

#[tokio::test]
async fn test_start_can_render_the_first_page() -> anyhow::Result<()> {
    // Arrange
    let view = Rc::new(RecordingGridView::new());
    let rotation = controller(
        9,
        RotationSettings {
            render_first_page: true,
            ..settings()
        },
        &view,
    );

    // Act
    rotation.start()?;

    // Assert
    assert_eq!(view.pages_shown(), vec![1]);
    let html = view.last_html().expect("first page rendered");
    assert!(html.contains(r#"data-poll-index="0""#));
    assert!(html.contains(r#"data-poll-index="3""#));
    assert!(!html.contains(r#"data-poll-index="4""#));
    Ok(())
}

#[tokio::test]
async fn test_run_rotates_every_interval_and_wraps() {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    let rotation = controller(9, settings(), &view);

    // Act
    let outcome = timeout(Duration::from_millis(45_000), rotation.run(TokioTimer)).await;

    // Assert
    assert!(outcome.is_err(), "run never returns");
    assert_eq!(view.calls().first(), Some(&GridCall::TotalPages(3)));
    assert_eq!(view.pages_shown(), vec![2, 3, 1, 2]);
    assert_eq!(view.fade_count(), 4);
}

#[tokio::test]
async fn test_run_survives_swap_failures() {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    view.fail_replace(true);
    let rotation = controller(5, settings(), &view);

    // Act
    let _ = timeout(Duration::from_millis(25_000), rotation.run(TokioTimer)).await;

    // Assert
    assert_eq!(view.fade_count(), 2);
    assert!(view.pages_shown().is_empty());
}

#[tokio::test]
async fn test_custom_page_size() -> anyhow::Result<()> {
    // Arrange
    pause();
    let view = Rc::new(RecordingGridView::new());
    let mut rotation = controller(
        5,
        RotationSettings {
            polls_per_page: 2,
            ..settings()
        },
        &view,
    );

    // Act
    rotation.rotate_once(&TokioTimer).await?;
    rotation.rotate_once(&TokioTimer).await?;

    // Assert
    assert_eq!(rotation.total_pages(), 3);
    let html = view.last_html().expect("cards were replaced");
    assert_eq!(html.matches(r#"class="poll-card fade-in""#).count(), 1);
    assert!(html.contains("<h2>Question 4?</h2>"));
    Ok(())
}
