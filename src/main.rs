use KiForm::Examples::kinetics_examples::kin_examples;
use KiForm::Utils::logger::init_logger;
use KiForm::settings::Settings;

pub fn main() {
    let settings = Settings::new();
    init_logger(settings.config().level_filter(), None);
    // 0 - power law, 1 - photocatalytic, 2 - molar masses
    let task: usize = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    kin_examples(task, settings.config());
}
