//! Localized text of the RPD Design window, its file dialogs and error boxes.

use std::fmt;
use std::path::Path;

use crate::catalog::RPD_DESIGN;
use crate::formats::{ self, ONTOLOGY_FILTER, PNG_FILTER };
use crate::I18n;

/// Widgets of the main window that carry text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    WindowTitle,
    Remedy,
    Base,
    Design,
    SwitchLanguage,
    LoadBase,
    LoadDefaultBase,
    LoadRpd,
    SaveDesign,
}

impl Label {
    pub const ALL: [Label; 9] = [
        Label::WindowTitle,
        Label::Remedy,
        Label::Base,
        Label::Design,
        Label::SwitchLanguage,
        Label::LoadBase,
        Label::LoadDefaultBase,
        Label::LoadRpd,
        Label::SaveDesign,
    ];

    pub fn source(self) -> &'static str {
        match self {
            Label::WindowTitle => "RPD Design",
            Label::Remedy => "Remedy",
            Label::Base => "Base",
            Label::Design => "Design",
            Label::SwitchLanguage => "Switch Language",
            Label::LoadBase => "Load Base",
            Label::LoadDefaultBase => "Load Default Base",
            Label::LoadRpd => "Load RPD",
            Label::SaveDesign => "Save Design",
        }
    }

    pub fn text(self, i18n: &I18n) -> String {
        i18n.t(RPD_DESIGN, self.source()).to_string()
    }
}

/// The file pickers the window opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileDialog {
    SelectBaseImage,
    SelectRpdInformation,
    SelectSavePath,
}

/// Localized strings handed to a file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDialogText {
    pub title: String,
    pub filter: String,
    /// Filter preselected when the dialog opens.
    pub selected_filter: Option<String>,
}

impl FileDialog {
    pub fn title_source(self) -> &'static str {
        match self {
            FileDialog::SelectBaseImage => "Select Base Image",
            FileDialog::SelectRpdInformation => "Select RPD Information",
            FileDialog::SelectSavePath => "Select Save Path",
        }
    }

    pub fn filter_source(self) -> String {
        match self {
            FileDialog::SelectBaseImage => formats::open_filter(),
            FileDialog::SelectRpdInformation => ONTOLOGY_FILTER.to_string(),
            FileDialog::SelectSavePath => formats::save_filter(),
        }
    }

    pub fn is_save(self) -> bool {
        matches!(self, FileDialog::SelectSavePath)
    }

    pub fn texts(self, i18n: &I18n) -> FileDialogText {
        let filter = self.filter_source();
        FileDialogText {
            title: i18n.t(RPD_DESIGN, self.title_source()).to_string(),
            filter: i18n.t(RPD_DESIGN, &filter).to_string(),
            selected_filter: self
                .is_save()
                .then(|| i18n.t(RPD_DESIGN, PNG_FILTER).to_string()),
        }
    }
}

/// Recoverable user errors, each shown as a modal "Error" box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpdError {
    /// The selected base file is not an image.
    InvalidImage,
    /// The selected RPD file is not an ontology.
    InvalidOntology,
    /// Save was requested with no design to save.
    NoDesignAvailable,
}

/// Localized title and body of an error box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDialog {
    pub title: String,
    pub message: String,
}

pub const ERROR_TITLE: &str = "Error";

impl RpdError {
    pub fn source_message(self) -> &'static str {
        match self {
            RpdError::InvalidImage => "Not a Valid Image!",
            RpdError::InvalidOntology => "Not a Valid Ontology!",
            RpdError::NoDesignAvailable => "No Available Design!",
        }
    }

    pub fn dialog(self, i18n: &I18n) -> ErrorDialog {
        ErrorDialog {
            title: i18n.t(RPD_DESIGN, ERROR_TITLE).to_string(),
            message: i18n.t(RPD_DESIGN, self.source_message()).to_string(),
        }
    }
}

impl fmt::Display for RpdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_message())
    }
}

impl std::error::Error for RpdError {}

/// Rejects a base image the open dialog would not offer.
pub fn check_base_image(path: &Path) -> Result<(), RpdError> {
    if formats::is_supported_image(path) { Ok(()) } else { Err(RpdError::InvalidImage) }
}

/// Rejects RPD information that is not an `.owl` file.
pub fn check_rpd_file(path: &Path) -> Result<(), RpdError> {
    if formats::is_ontology(path) { Ok(()) } else { Err(RpdError::InvalidOntology) }
}

pub fn check_design_available(has_design: bool) -> Result<(), RpdError> {
    if has_design { Ok(()) } else { Err(RpdError::NoDesignAvailable) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::LanguageTag;

    fn i18n(tag: LanguageTag) -> I18n {
        I18n::new(tag).unwrap()
    }

    #[test]
    fn labels_in_chinese() {
        let zh = i18n(LanguageTag::ZhCn);
        let texts: Vec<String> = Label::ALL.iter().map(|l| l.text(&zh)).collect();
        assert_eq!(texts, vec![
            "RPD设计", "矫正", "底图", "设计图", "English",
            "加载底图", "加载默认底图", "加载RPD", "保存设计图"
        ]);
    }

    #[test]
    fn switch_language_label_names_the_other_language() {
        for tag in LanguageTag::ALL {
            assert_eq!(Label::SwitchLanguage.text(&i18n(tag)), tag.toggled().native_name());
        }
    }

    #[test]
    fn save_dialog_preselects_png() {
        let zh = FileDialog::SelectSavePath.texts(&i18n(LanguageTag::ZhCn));
        assert_eq!(zh.title, "选择存储路径");
        assert_eq!(zh.selected_filter.as_deref(), Some("便携式网络图形 (*.png)"));
        assert!(zh.filter.starts_with("Windows位图 (*.bmp *.dib);;"));

        let en = FileDialog::SelectSavePath.texts(&i18n(LanguageTag::EnUs));
        assert_eq!(en.selected_filter.as_deref(), Some(PNG_FILTER));
        assert_eq!(en.filter, formats::save_filter());
    }

    #[test]
    fn open_dialogs_have_no_preselection() {
        let zh = i18n(LanguageTag::ZhCn);
        let base = FileDialog::SelectBaseImage.texts(&zh);
        assert_eq!(base.title, "选择底图");
        assert!(base.filter.starts_with("所有支持的格式 ("));
        assert_eq!(base.selected_filter, None);

        let rpd = FileDialog::SelectRpdInformation.texts(&zh);
        assert_eq!(rpd.title, "选择RPD信息");
        assert_eq!(rpd.filter, "本体文件 (*.owl)");
    }

    #[test]
    fn error_dialogs() {
        let zh = i18n(LanguageTag::ZhCn);
        assert_eq!(RpdError::InvalidImage.dialog(&zh), ErrorDialog {
            title: "错误".to_string(),
            message: "非有效的图像文件！".to_string(),
        });
        assert_eq!(RpdError::InvalidOntology.dialog(&zh).message, "非有效的本体文件！");
        assert_eq!(RpdError::NoDesignAvailable.dialog(&zh).message, "无可用的设计图！");

        let en = i18n(LanguageTag::EnUs);
        assert_eq!(RpdError::NoDesignAvailable.dialog(&en).title, "Error");
        assert_eq!(RpdError::NoDesignAvailable.to_string(), "No Available Design!");
    }

    #[test]
    fn path_guards() {
        assert_eq!(check_base_image(Path::new("base.png")), Ok(()));
        assert_eq!(check_base_image(Path::new("base.owl")), Err(RpdError::InvalidImage));
        assert_eq!(check_rpd_file(Path::new("rpd.owl")), Ok(()));
        assert_eq!(check_rpd_file(Path::new("rpd.png")), Err(RpdError::InvalidOntology));
        assert_eq!(check_design_available(false), Err(RpdError::NoDesignAvailable));
        assert_eq!(check_design_available(true), Ok(()));
    }
}
