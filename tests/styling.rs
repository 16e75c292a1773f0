use pltx::plotting::{AxisSetup, HighlightRegion, LegendFormat, PlotCommand, ReferenceLines, Recorder};
use pltx::{interpolate, resolve_color, width_for, Color, StyleContext, StyleOptions};
use serde_json::json;

#[test]
fn test_figure_workflow() {
    let mut ctx = StyleContext::from_options(
        &StyleOptions::default()
            .palette("tab10", 4)
            .vary_linewidth(1.5, 1.3),
    )
    .unwrap();
    ctx.apply_preset("presentation").unwrap();
    // Presets set the base width; progression still applies
    assert_eq!(ctx.base_linewidth(), 3.0);

    let mut rec = Recorder::new();
    for i in 0..5 {
        ctx.plot_styled(&mut rec, [0.0, 1.0], [i as f64, i as f64 + 1.0])
            .label(format!("run {}", i))
            .build()
            .unwrap();
    }
    ctx.add_reference_line(&mut rec, &ReferenceLines::new().horizontal(0.0).label("zero"))
        .unwrap();
    ctx.add_highlight_region(&mut rec, &HighlightRegion::new().x_range(0.2, 0.4))
        .unwrap();
    ctx.setup_axis(&mut rec, &AxisSetup::new().xlabel("t").ylabel("v").grid(0.2))
        .unwrap();
    ctx.format_legend(&mut rec, &LegendFormat::new().ncol(2)).unwrap();

    let commands = rec.commands();
    assert_eq!(commands.len(), 9);
    let lines: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            PlotCommand::Line(l) => Some(l),
            _ => None,
        })
        .collect();
    assert_eq!(lines.len(), 5);
    // Four colors, the fifth line wraps around
    assert_eq!(lines[4].color, lines[0].color);
    assert_ne!(lines[1].color, lines[0].color);
    for pair in lines.windows(2) {
        assert!(pair[1].linewidth > pair[0].linewidth);
    }
    assert_eq!(lines[0].linewidth, 3.0);

    let json: serde_json::Value = serde_json::from_str(&rec.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json[5]["kind"], json!("reference_line"));
    assert_eq!(json[5]["label"], json!("zero"));
    assert_eq!(json[6]["kind"], json!("span"));
    assert_eq!(json[8]["ncol"], json!(2));
}

#[test]
fn test_scoped_preset_does_not_leak() {
    let mut ctx = StyleContext::new().unwrap();
    let mut rec = Recorder::new();
    let width = ctx
        .with_preset("poster", |c| {
            c.plot_styled(&mut rec, [0.0], [0.0]).build().unwrap().linewidth
        })
        .unwrap();
    assert_eq!(width, 4.0);
    assert_eq!(ctx.base_linewidth(), 2.0);
    assert_eq!(ctx.color_cycle_index(), 0);
}

#[test]
fn test_public_helpers() {
    for i in 0..5 {
        assert_eq!(
            resolve_color("viridis", 5, i).unwrap(),
            resolve_color("viridis", 5, i + 5).unwrap()
        );
    }
    assert!(resolve_color("viridis", 5, -1).unwrap_err().is_invalid_argument());
    assert!(resolve_color("no-such-map", 5, 0).unwrap_err().is_configuration());

    assert_eq!(width_for(0, 2.0, 1.3).unwrap(), 2.0);
    assert!(width_for(-1, 2.0, 1.3).unwrap_err().is_invalid_argument());

    let ramp = interpolate(&Color::BLACK, &Color::WHITE, 3).unwrap();
    assert_eq!(ramp[1], Color::rgb(0.5, 0.5, 0.5));
}

#[test]
fn test_options_from_json() {
    let mut ctx = StyleContext::new().unwrap();
    ctx.initialize_from_value(json!({
        "palette_name": "Set2",
        "palette_size": 8,
        "font_size_medium": 11
    }))
    .unwrap();
    assert_eq!(ctx.palette().len(), 8);
    assert_eq!(ctx.fonts().medium, 11.0);
    assert_eq!(ctx.rc_params()["font.size"], json!(11.0));

    let err = ctx
        .initialize_from_value(json!({"palette_size": 0}))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}
