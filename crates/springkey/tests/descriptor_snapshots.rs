//! Snapshot tests pinning the exact descriptor text.

use springkey::{Animation, Dialects, SequentialNames, build_descriptor, mapper};

#[test]
fn snapshot_three_sample_standard() {
    let css = build_descriptor(
        &[0.5, 0.2, 0.05],
        "anim-test",
        33,
        |v| v.to_string(),
        &Dialects::default(),
    )
    .unwrap();
    insta::assert_snapshot!(css, @"@keyframes anim-test {0%{0.5}50%{0.2}100%{0.05}}.anim-test{animation-duration:33ms;animation-name:anim-test;animation-timing-function:linear;animation-fill-mode:both;}");
}

#[test]
fn snapshot_three_sample_moz_cascade() {
    let css = build_descriptor(
        &[0.5, 0.2, 0.05],
        "anim-test",
        33,
        |v| v.to_string(),
        &Dialects::new(["-moz-", ""]),
    )
    .unwrap();
    insta::assert_snapshot!(css, @"@-moz-keyframes anim-test {0%{0.5}50%{0.2}100%{0.05}}@keyframes anim-test {0%{0.5}50%{0.2}100%{0.05}}.anim-test{-moz-animation-duration:33ms;animation-duration:33ms;-moz-animation-name:anim-test;animation-name:anim-test;-moz-animation-timing-function:linear;animation-timing-function:linear;-moz-animation-fill-mode:both;animation-fill-mode:both;}");
}

#[test]
fn snapshot_sampled_translate_x() {
    let mut names = SequentialNames::new("spring-");
    let descriptor = Animation::new(1.0, 0.0)
        .stiffness(170.0)
        .damping(1.0)
        .dialects(Dialects::new(["-webkit-", ""]))
        .build(&mut names, mapper::translate_x("px"))
        .unwrap();
    insta::assert_snapshot!(descriptor.render(), @"@-webkit-keyframes spring-0 {0%{transform:translateX(-0.7px)}5.55556%{transform:translateX(0.49px)}11.11111%{transform:translateX(-0.3430000000000001px)}16.66667%{transform:translateX(0.24009999999999998px)}22.22222%{transform:translateX(-0.16806999999999994px)}27.77778%{transform:translateX(0.11764899999999989px)}33.33333%{transform:translateX(-0.08235429999999988px)}38.88889%{transform:translateX(0.05764800999999989px)}44.44444%{transform:translateX(-0.04035360699999993px)}50%{transform:translateX(0.02824752489999996px)}55.55556%{transform:translateX(-0.019773267429999977px)}61.11111%{transform:translateX(0.013841287200999988px)}66.66667%{transform:translateX(-0.009688901040699999px)}72.22222%{transform:translateX(0.006782230728489998px)}77.77778%{transform:translateX(-0.004747561509942998px)}83.33333%{transform:translateX(0.0033232930569600996px)}88.88889%{transform:translateX(-0.0023263051398720687px)}94.44444%{transform:translateX(0.0016284135979104481px)}100%{transform:translateX(-0.0011398895185373132px)}}@keyframes spring-0 {0%{transform:translateX(-0.7px)}5.55556%{transform:translateX(0.49px)}11.11111%{transform:translateX(-0.3430000000000001px)}16.66667%{transform:translateX(0.24009999999999998px)}22.22222%{transform:translateX(-0.16806999999999994px)}27.77778%{transform:translateX(0.11764899999999989px)}33.33333%{transform:translateX(-0.08235429999999988px)}38.88889%{transform:translateX(0.05764800999999989px)}44.44444%{transform:translateX(-0.04035360699999993px)}50%{transform:translateX(0.02824752489999996px)}55.55556%{transform:translateX(-0.019773267429999977px)}61.11111%{transform:translateX(0.013841287200999988px)}66.66667%{transform:translateX(-0.009688901040699999px)}72.22222%{transform:translateX(0.006782230728489998px)}77.77778%{transform:translateX(-0.004747561509942998px)}83.33333%{transform:translateX(0.0033232930569600996px)}88.88889%{transform:translateX(-0.0023263051398720687px)}94.44444%{transform:translateX(0.0016284135979104481px)}100%{transform:translateX(-0.0011398895185373132px)}}.spring-0{-webkit-animation-duration:300ms;animation-duration:300ms;-webkit-animation-name:spring-0;animation-name:spring-0;-webkit-animation-timing-function:linear;animation-timing-function:linear;-webkit-animation-fill-mode:both;animation-fill-mode:both;}");
}
