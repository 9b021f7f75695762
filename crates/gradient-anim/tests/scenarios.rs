use anyhow::Result;
use gradient_anim::{
    AttachOptions, BezierPoints, EasingCache, ElementDescriptor, FrameInput, FrameOutput,
    GradientAnimator, Retarget, StopAlignment, StyleFingerprint, TimeOptions, TransitionProvider,
    TransitionStyle,
};
use gradient_model::{parse, stringify, Length, ParseOptions, ParsedGradient, Rgba};

fn provider(
    cache: &mut EasingCache,
    key: &str,
    raw: &str,
    options: TimeOptions,
) -> Result<TransitionProvider> {
    let value = parse(raw, &ParseOptions::default())?;
    Ok(TransitionProvider::new(key, value, options, StopAlignment::End, cache))
}

#[test]
fn linear_transition_reports_midpoint_blend() -> Result<()> {
    let style = TransitionStyle::new("background-image", "1000ms", "0s", "linear");
    let options = TimeOptions::from_transition_style(&style)?;
    let mut cache = EasingCache::new();

    let mut p = provider(&mut cache, "A", "linear-gradient(to right, red, blue)", options)?;
    p.observe(
        0.0,
        "B",
        "linear-gradient(to right, blue, red)",
        &ParseOptions::default(),
        options,
        &mut cache,
    )?;

    assert!((p.progress(500.0) - 0.5).abs() < 1e-9);
    let value = p.current_value(500.0)?;
    assert_eq!(value.stops()[0].color, Rgba::new(128.0, 0.0, 128.0, 1.0));
    assert_eq!(value.stops()[1].color, Rgba::new(128.0, 0.0, 128.0, 1.0));
    Ok(())
}

#[test]
fn extra_target_stops_pair_with_last_source_stop() -> Result<()> {
    let options = TimeOptions::new(1000.0, 0.0, BezierPoints::LINEAR);
    let mut cache = EasingCache::new();
    let mut p = provider(&mut cache, "A", "linear-gradient(0rad, red 0%, blue 100%)", options)?;
    p.observe(
        0.0,
        "B",
        "linear-gradient(0rad, red 0%, lime 30%, white 60%, black 100%)",
        &ParseOptions::default(),
        options,
        &mut cache,
    )?;

    let value = p.current_value(500.0)?;
    let stops = value.stops();
    assert_eq!(stops.len(), 4);
    assert_eq!(stops[2].color, Rgba::new(128.0, 128.0, 255.0, 1.0));
    assert_eq!(stops[2].length, Some(Length::percent(80.0)));
    assert_eq!(stops[3].color, Rgba::new(0.0, 0.0, 128.0, 1.0));
    assert_eq!(stops[3].length, Some(Length::percent(100.0)));
    Ok(())
}

#[test]
fn mismatched_units_snap_to_target() -> Result<()> {
    let options = TimeOptions::new(1000.0, 0.0, BezierPoints::LINEAR);
    let mut cache = EasingCache::new();
    let mut p = provider(&mut cache, "A", "linear-gradient(0rad, red 10%, blue)", options)?;
    p.observe(
        0.0,
        "B",
        "linear-gradient(0rad, red 20px, blue)",
        &ParseOptions::default(),
        options,
        &mut cache,
    )?;

    for time in [0.0, 250.0, 990.0, 1000.0] {
        let value = p.current_value(time)?;
        assert_eq!(value.stops()[0].length, Some(Length::px(20.0)), "at {time}ms");
    }
    Ok(())
}

#[test]
fn retargeting_never_jumps() -> Result<()> {
    let options = TimeOptions::new(400.0, 0.0, BezierPoints::EASE);
    let mut cache = EasingCache::new();
    let parse_options = ParseOptions::default();
    let mut p = provider(&mut cache, "rest", "linear-gradient(0rad, red, blue)", options)?;

    let targets = [
        (0.0, "hover", "linear-gradient(0rad, white, black)", Retarget::Settled),
        (120.0, "rest", "linear-gradient(0rad, red, blue)", Retarget::Reversing),
        (180.0, "active", "linear-gradient(0rad, lime 0%, red 40%, blue)", Retarget::Redirected),
        (900.0, "rest", "linear-gradient(0rad, red, blue)", Retarget::Settled),
    ];
    for (time, key, raw, expected) in targets {
        let before = p.current_value(time)?;
        let retarget = p.observe(time, key, raw, &parse_options, options, &mut cache)?;
        assert_eq!(retarget, Some(expected), "retarget at {time}ms");
        let after = p.current_value(time)?;
        assert_eq!(before.stops().first(), after.stops().first(), "jump at {time}ms");
    }
    assert!(!p.is_active(2000.0));
    Ok(())
}

#[test]
fn serialized_values_parse_back() -> Result<()> {
    let inputs = [
        "linear-gradient(45deg, red, rgba(0, 0, 255, 0.25) 30%, green 4em)",
        "repeating-linear-gradient(to bottom left, #fff 0px, #000 10px)",
        "radial-gradient(circle closest-side at right 20%, yellow, transparent)",
        "repeating-radial-gradient(ellipse at top, red 0%, blue 25%)",
    ];
    for raw in inputs {
        let first = parse(raw, &ParseOptions::default())?;
        let css = stringify(&first)?;
        let second = parse(&css, &ParseOptions::default())?;
        assert_eq!(first, second, "{raw} -> {css}");
    }
    Ok(())
}

#[test]
fn animator_drives_fingerprinted_frames() -> Result<()> {
    let mut animator = GradientAnimator::new();
    animator.attach(
        ElementDescriptor::new("card")
            .with_class("gt-wrapper")
            .with_render_target("card-bg"),
        AttachOptions::default(),
    )?;

    let style = TransitionStyle::new("all", "200ms", "0s", "ease-out");
    let time_options = TimeOptions::from_transition_style(&style)?;
    let rest = "linear-gradient(to right, red, blue)";
    let hover = "linear-gradient(to right, blue, red)";
    let key_for = |value: &str| {
        StyleFingerprint::new("--gradient-transition")
            .declared("background-image", value)
            .em_size(16.0)
            .timing(&time_options)
            .build()
    };
    let (rest_key, hover_key) = (key_for(rest), key_for(hover));

    let frame = |time_ms, raw_value, key| FrameInput {
        time_ms,
        raw_value,
        key,
        em_size: 16.0,
        time_options,
    };

    let mut outputs = Vec::new();
    outputs.push(animator.frame("card", &frame(0.0, rest, rest_key.as_str()))?);
    let mut time = 16.0;
    while time <= 400.0 {
        outputs.push(animator.frame("card", &frame(time, hover, hover_key.as_str()))?);
        time += 16.0;
    }

    assert!(matches!(outputs[0], FrameOutput::Clear { .. }));
    let rendered = outputs
        .iter()
        .filter(|o| matches!(o, FrameOutput::Render { .. }))
        .count();
    // 200ms at 16ms per frame, starting at the frame that changed the key.
    assert_eq!(rendered, 13);
    assert!(matches!(outputs.last(), Some(FrameOutput::Clear { .. })));

    let provider = animator.provider("card").map(|p| p.next().value.clone());
    assert_eq!(provider, Some(hover.parse::<ParsedGradient>()?));
    Ok(())
}
