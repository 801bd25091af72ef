
use crate::directory::PersonRecord;

/// Directory shared by the session tests
pub(crate) fn sample_directory() -> Vec<PersonRecord> {
    let mut sato = PersonRecord::new("S001", "佐藤 一郎").with_phonetic("サトウ イチロウ");
    sato.blood_type = "O+".to_string();
    sato.history = vec!["高血圧".to_string()];
    sato.medications = vec!["降圧薬".to_string()];
    sato.allergies = vec!["ピーナッツ".to_string()];
    sato.physician = "佐々木医院".to_string();
    sato.emergency_contact_relation = "妻".to_string();
    sato.emergency_contact_phone = "090-1234-5678".to_string();

    vec![
        sato,
        PersonRecord::new("S002", "高橋 花子").with_phonetic("タカハシ ハナコ"),
        PersonRecord::new("S003", "山田 太郎").with_phonetic("やまだ たろう"),
        PersonRecord::new("S004", "伊藤 次郎"),
        PersonRecord::new("S005", "鈴木 三郎").with_phonetic("スズキ サブロウ"),
    ]
}
