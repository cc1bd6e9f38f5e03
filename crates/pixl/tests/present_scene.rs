//! Facade-level test: compose a small scene, present it, then present an
//! update and check that only the change is written.

use pixl::prelude::*;
use pixl::{ProgressBar, Stretch, StretchPolicy};

fn scene() -> Viewport {
    let mut viewport: Viewport =
        Viewport::new(12, 3).with_base(Pixel::new(' ', Color::Gray, Color::Black));
    let title = Image::from_text("ok", Color::White, Color::Transparent);
    let mut title = Stretch::new(title, 2, StretchPolicy::Stretch);
    title.props_mut().set_anchor(Anchor::CENTER);
    viewport.push(Box::new(title));

    let mut bar = ProgressBar::new(12, 1).with_ratio(0.25);
    bar.props_mut().set_anchor(Anchor::BOTTOM);
    viewport.push(Box::new(bar));
    viewport
}

#[test]
fn headless_frame_matches_layout() -> Result<()> {
    let mut viewport = scene();
    let mut sink = HeadlessSink::new();
    sink.present(&viewport.render())?;
    assert_eq!(
        sink.lines(),
        vec![
            "    ookk    ".to_owned(),
            " ".repeat(12),
            " ".repeat(12),
        ]
    );
    let bottom = sink.last().map(|frame| frame.get(0, 2));
    assert_eq!(bottom.map(|p| p.background), Some(Color::Green));
    Ok(())
}

#[test]
fn presenter_writes_only_changes_after_first_frame() -> Result<()> {
    let mut viewport = scene();
    let mut presenter = Presenter::new(Vec::new(), PresenterConfig::default());

    presenter.present(&viewport.render())?;
    presenter.present(&viewport.render())?;
    assert_eq!(presenter.frames(), 2);

    if let Some(title) = viewport.source_mut(0) {
        title.props_mut().set_offset(Vec2::new(0, 1));
    }
    presenter.present(&viewport.render())?;
    assert_eq!(presenter.frames(), 3);

    let bytes = presenter.into_inner()?;
    let output = String::from_utf8_lossy(&bytes);
    // Once for the first frame, once for the moved title; the unchanged
    // second frame writes nothing.
    assert_eq!(output.matches("ookk").count(), 2);
    assert!(output.ends_with("\x1b[?25h"));
    Ok(())
}
