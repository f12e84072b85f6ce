use std::path::PathBuf;
use pubstyle::{
    backend::{ FontEntry, FontManager },
    colors::ColorSet,
    fonts,
    memory::MemoryBackend,
    style::{ RcParams, RcValue },
    Session,
};

fn installed() -> Vec<FontEntry> {
    vec![
        FontEntry::new("Times New Roman", "/usr/share/fonts/times.ttf"),
        FontEntry::new("DejaVu Sans", "/usr/share/fonts/DejaVuSans.ttf"),
        FontEntry::new("DejaVu Sans", "/usr/share/fonts/DejaVuSans-Bold.ttf"),
        FontEntry::new("Arial", "/usr/share/fonts/arial.ttf"),
    ]
}

#[test]
fn listings_are_sorted_and_unique() {
    let session = Session::new(MemoryBackend::new().with_fonts(installed()));
    assert_eq!(session.list_font_names(), vec!["Arial", "DejaVu Sans", "Times New Roman"]);
    assert_eq!(
        session.list_font_files(),
        vec![
            PathBuf::from("/usr/share/fonts/DejaVuSans-Bold.ttf"),
            PathBuf::from("/usr/share/fonts/DejaVuSans.ttf"),
            PathBuf::from("/usr/share/fonts/arial.ttf"),
            PathBuf::from("/usr/share/fonts/times.ttf"),
        ],
    );
}

#[test]
fn regenerate_picks_up_new_fonts() {
    let mut backend = MemoryBackend::new().with_fonts(installed());
    backend.install_font(FontEntry::new("Computer Modern", "/home/me/.fonts/cmr10.ttf"));
    assert!(!fonts::list_font_names(&backend).contains(&"Computer Modern".to_string()));

    fonts::regenerate_fonts(&mut backend);
    assert_eq!(backend.cache_generation(), 1);
    assert!(fonts::list_font_names(&backend).contains(&"Computer Modern".to_string()));
}

#[test]
fn bold_times_fix_always_rebuilds() {
    let mut session = Session::new(MemoryBackend::new());
    session.fix_bold_times_new_roman();
    assert!(!session.backend().weight_aliases().contains("roman"));
    assert_eq!(session.backend().cache_generation(), 1);

    session.fix_bold_times_new_roman();
    assert_eq!(session.backend().cache_generation(), 2);
    assert!(!session.backend_mut().remove_weight_alias("roman"));
}

#[test]
fn reset_defaults_sticks() {
    let mut session = Session::new(MemoryBackend::new());
    let rc = RcParams::new().with("lines.linewidth", 4.0).unwrap();
    session.set_style("talk", &rc).unwrap();
    assert_eq!(session.backend().rc().get("lines.linewidth"), Some(&RcValue::Float(4.0)));
    assert_eq!(session.backend().palette(), ColorSet::Publication.colors().as_slice());

    session.reset_defaults();
    assert!(session.backend().rc().is_empty());
    assert_eq!(session.backend().palette(), MemoryBackend::FACTORY_PALETTE.colors().as_slice());

    // later calls do not quietly re-apply the baseline
    session.backend_mut().add_axes();
    session.get_next_color(None).unwrap();
    assert!(session.backend().rc().is_empty());
}

#[test]
fn init_is_explicit() {
    let mut session = Session::new(MemoryBackend::new());
    assert!(session.backend().rc().is_empty());
    assert!(!session.is_initialized());
    session.init().unwrap();
    assert!(session.is_initialized());
    assert_eq!(session.backend().rc().get("font.size"), Some(&RcValue::Float(14.0)));
}
