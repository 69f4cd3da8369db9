//! Reply languages and their fixed texts.

use serde::{Deserialize, Serialize};

/// Languages the bot replies in. Anything unrecognized falls back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Lang {
    Uk,
    Ru,
    #[default]
    En,
}

impl Lang {
    /// Maps an IETF tag ("uk", "ru-RU", "en-GB", "UK") to a reply language.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "uk" | "ua" => Lang::Uk,
            "ru" => Lang::Ru,
            _ => Lang::En,
        }
    }

    /// Strict variant for user input (`/lang xx`): `None` when the code is not supported.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "uk" | "ua" => Some(Lang::Uk),
            "ru" => Some(Lang::Ru),
            "en" => Some(Lang::En),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Lang::Uk => "uk",
            Lang::Ru => "ru",
            Lang::En => "en",
        }
    }
}

/// Fixed reply texts for one language.
#[derive(Debug)]
pub struct Texts {
    pub greeting: &'static str,
    pub help: &'static str,
    pub throttled: &'static str,
    pub unavailable: &'static str,
    pub unknown_command: &'static str,
    pub lang_set: &'static str,
    pub lang_usage: &'static str,
    pub drive_on: &'static str,
    pub drive_off: &'static str,
    pub drive_not_connected: &'static str,
    pub drive_saved: &'static str,
    pub learn_on: &'static str,
    pub learn_off: &'static str,
    pub learned: &'static str,
    pub autolog_on: &'static str,
    pub autolog_off: &'static str,
    pub todo_added: &'static str,
    pub todo_usage: &'static str,
    pub todo_not_found: &'static str,
    pub todo_cleared: &'static str,
    pub todo_toggled: &'static str,
    pub todo_removed: &'static str,
    pub photos_empty: &'static str,
    pub photos_cleared: &'static str,
    pub photo_saved: &'static str,
    pub brain_empty: &'static str,
    pub brain_cleared: &'static str,
    pub brain_count: &'static str,
    pub ask_city: &'static str,
    pub ai_unavailable: &'static str,
    pub say_usage: &'static str,
    pub attachment_hint: &'static str,
}

static EN: Texts = Texts {
    greeting: "👋 Hi! I can check the weather, exchange rates, news, holidays and Wikipedia, keep a checklist and remember things for you. Send /help for the list of commands.",
    help: "Commands:\n/weather [city] – forecast\n/todo [text] – checklist\n/done <id>, /rm <id>, /clear_todo\n/photos, /forget_photos – photo memory\n/learn on|off – remember what you write\n/autolog on|off – remember quietly\n/brain, /forget_brain – memory notes\n/drive on|off – save attachments to Drive\n/ai <question>, /say <text>\n/lang uk|ru|en",
    throttled: "⏳ Too many messages, please slow down a little.",
    unavailable: "⚠️ This service is unavailable right now, please try again later.",
    unknown_command: "Unknown command. Send /help for the list.",
    lang_set: "✅ Language set to English.",
    lang_usage: "Usage: /lang uk|ru|en",
    drive_on: "📁 Drive mode is on for one hour: attachments will be saved to Drive.",
    drive_off: "📁 Drive mode is off.",
    drive_not_connected: "📁 Google Drive is not connected.",
    drive_saved: "📁 Saved to Drive:",
    learn_on: "🧠 Learn mode is on: I will remember what you write.",
    learn_off: "🧠 Learn mode is off.",
    learned: "🧠 Remembered.",
    autolog_on: "📝 Autolog is on.",
    autolog_off: "📝 Autolog is off.",
    todo_added: "✅ Added to the checklist:",
    todo_usage: "Usage: /todo <text>, /done <id>, /rm <id>",
    todo_not_found: "No checklist item with that id.",
    todo_cleared: "🧹 Checklist cleared.",
    todo_toggled: "☑️ Item updated.",
    todo_removed: "🗑 Item removed.",
    photos_empty: "No photos remembered yet.",
    photos_cleared: "🧹 Photo memory cleared.",
    photo_saved: "📸 Photo remembered.",
    brain_empty: "🧠 Nothing remembered yet.",
    brain_cleared: "🧠 Memory cleared.",
    brain_count: "🧠 Notes remembered:",
    ask_city: "Which city? For example: weather in Kyiv",
    ai_unavailable: "🤖 AI is not configured. Send /help for what I can do.",
    say_usage: "Usage: /say <text>",
    attachment_hint: "Turn on /drive to save attachments to Google Drive.",
};

static UK: Texts = Texts {
    greeting: "👋 Привіт! Я підкажу погоду, курси валют, новини, свята та статті з Вікіпедії, веду список справ і запам'ятовую для вас нотатки. Надішліть /help, щоб побачити команди.",
    help: "Команди:\n/weather [місто] – прогноз\n/todo [текст] – список справ\n/done <id>, /rm <id>, /clear_todo\n/photos, /forget_photos – фотопам'ять\n/learn on|off – запам'ятовувати написане\n/autolog on|off – тихий запис\n/brain, /forget_brain – нотатки\n/drive on|off – зберігати вкладення на Диск\n/ai <питання>, /say <текст>\n/lang uk|ru|en",
    throttled: "⏳ Забагато повідомлень, трохи повільніше, будь ласка.",
    unavailable: "⚠️ Сервіс зараз недоступний, спробуйте пізніше.",
    unknown_command: "Невідома команда. Надішліть /help.",
    lang_set: "✅ Мову змінено на українську.",
    lang_usage: "Використання: /lang uk|ru|en",
    drive_on: "📁 Режим Диска увімкнено на годину: вкладення зберігатимуться на Диск.",
    drive_off: "📁 Режим Диска вимкнено.",
    drive_not_connected: "📁 Google Диск не підключено.",
    drive_saved: "📁 Збережено на Диск:",
    learn_on: "🧠 Режим навчання увімкнено: я запам'ятовуватиму написане.",
    learn_off: "🧠 Режим навчання вимкнено.",
    learned: "🧠 Запам'ятав.",
    autolog_on: "📝 Автозапис увімкнено.",
    autolog_off: "📝 Автозапис вимкнено.",
    todo_added: "✅ Додано до списку:",
    todo_usage: "Використання: /todo <текст>, /done <id>, /rm <id>",
    todo_not_found: "Немає пункту з таким id.",
    todo_cleared: "🧹 Список очищено.",
    todo_toggled: "☑️ Пункт оновлено.",
    todo_removed: "🗑 Пункт видалено.",
    photos_empty: "Фото ще не збережено.",
    photos_cleared: "🧹 Фотопам'ять очищено.",
    photo_saved: "📸 Фото збережено.",
    brain_empty: "🧠 Поки нічого не запам'ятовано.",
    brain_cleared: "🧠 Пам'ять очищено.",
    brain_count: "🧠 Збережених нотаток:",
    ask_city: "Яке місто? Наприклад: погода в Києві",
    ai_unavailable: "🤖 ШІ не налаштовано. Надішліть /help.",
    say_usage: "Використання: /say <текст>",
    attachment_hint: "Увімкніть /drive, щоб зберігати вкладення на Google Диск.",
};

static RU: Texts = Texts {
    greeting: "👋 Привет! Я подскажу погоду, курсы валют, новости, праздники и статьи из Википедии, веду список дел и запоминаю заметки. Отправьте /help, чтобы увидеть команды.",
    help: "Команды:\n/weather [город] – прогноз\n/todo [текст] – список дел\n/done <id>, /rm <id>, /clear_todo\n/photos, /forget_photos – фотопамять\n/learn on|off – запоминать написанное\n/autolog on|off – тихая запись\n/brain, /forget_brain – заметки\n/drive on|off – сохранять вложения на Диск\n/ai <вопрос>, /say <текст>\n/lang uk|ru|en",
    throttled: "⏳ Слишком много сообщений, помедленнее, пожалуйста.",
    unavailable: "⚠️ Сервис сейчас недоступен, попробуйте позже.",
    unknown_command: "Неизвестная команда. Отправьте /help.",
    lang_set: "✅ Язык изменён на русский.",
    lang_usage: "Использование: /lang uk|ru|en",
    drive_on: "📁 Режим Диска включён на час: вложения будут сохраняться на Диск.",
    drive_off: "📁 Режим Диска выключен.",
    drive_not_connected: "📁 Google Диск не подключён.",
    drive_saved: "📁 Сохранено на Диск:",
    learn_on: "🧠 Режим обучения включён: я буду запоминать написанное.",
    learn_off: "🧠 Режим обучения выключен.",
    learned: "🧠 Запомнил.",
    autolog_on: "📝 Автозапись включена.",
    autolog_off: "📝 Автозапись выключена.",
    todo_added: "✅ Добавлено в список:",
    todo_usage: "Использование: /todo <текст>, /done <id>, /rm <id>",
    todo_not_found: "Нет пункта с таким id.",
    todo_cleared: "🧹 Список очищен.",
    todo_toggled: "☑️ Пункт обновлён.",
    todo_removed: "🗑 Пункт удалён.",
    photos_empty: "Фото ещё не сохранены.",
    photos_cleared: "🧹 Фотопамять очищена.",
    photo_saved: "📸 Фото сохранено.",
    brain_empty: "🧠 Пока ничего не запомнено.",
    brain_cleared: "🧠 Память очищена.",
    brain_count: "🧠 Сохранённых заметок:",
    ask_city: "Какой город? Например: погода в Киеве",
    ai_unavailable: "🤖 ИИ не настроен. Отправьте /help.",
    say_usage: "Использование: /say <текст>",
    attachment_hint: "Включите /drive, чтобы сохранять вложения на Google Диск.",
};

/// Reply texts for `lang`.
pub fn texts(lang: Lang) -> &'static Texts {
    match lang {
        Lang::Uk => &UK,
        Lang::Ru => &RU,
        Lang::En => &EN,
    }
}
