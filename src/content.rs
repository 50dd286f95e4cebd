//! Invitation content
//!
//! Everything the page shows (names, dates, photos, accounts) lives in an
//! `InvitationContent` value. A JSON file can override any part of it; missing
//! keys keep the built-in defaults.

use std::fs;
use std::path::Path;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::countdown::CountdownTarget;
use crate::error::{InvitationError, Result};
use crate::navigation::{Section, default_sections};
use crate::rotation::ImagePool;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub parents: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Target date-time, RFC 3339 or naive local time
    pub target: String,
    /// Offset applied to naive targets, in minutes east of UTC
    pub utc_offset_minutes: i32,
    pub heading: String,
    pub arrived_text: String,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            target: "2025-06-22T00:00:00".to_string(),
            utc_offset_minutes: 7 * 60,
            heading: "Hitung Mundur Menuju Hari-H".to_string(),
            arrived_text: "Waktu telah tiba!".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub title: String,
    pub subtitle: String,
    pub address: String,
    pub embed_url: String,
    pub map_url: String,
    pub link_label: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            title: "Denah Lokasi".to_string(),
            subtitle: "Kami menantikan kehadiran Anda di hari bahagia kami".to_string(),
            address: "Jl. Wanasida, Dusun 3, Kebutuh, Bukateja".to_string(),
            embed_url: "https://www.google.com/maps/embed?pb=!1m17!1m12!1m3!1d989.0935879844401!2d109.48207526952662!3d-7.423757999536665!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m2!1m1!2zN8KwMjUnMjUuNSJTIDEwOcKwMjgnNTcuOCJF!5e0!3m2!1sen!2sid!4v1749222485622!5m2!1sen!2sid".to_string(),
            map_url: "https://maps.app.goo.gl/1kzqMZzHBUSM8u276".to_string(),
            link_label: "Lihat Lokasi Perayaan".to_string(),
        }
    }
}

/// A bank account guests can transfer a gift to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftAccount {
    pub bank: String,
    pub logo: String,
    pub holder: String,
    /// Number as printed, grouped for reading
    pub number_display: String,
    /// Number as copied to the clipboard
    pub number: String,
    /// Confirmation shown after copying
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gifts {
    pub title: String,
    pub intro: String,
    pub cashless_title: String,
    pub accounts: Vec<GiftAccount>,
    pub address_title: String,
    pub address: String,
    pub address_message: String,
    pub note: String,
    pub copy_number_label: String,
    pub copy_address_label: String,
    pub copied_label: String,
}

impl Default for Gifts {
    fn default() -> Self {
        Self {
            title: "Kirim Hadiah".to_string(),
            intro: "Doa restu Anda adalah karunia terindah bagi kami. Namun jika Anda ingin berbagi kebahagiaan dalam bentuk lain, Anda dapat menggunakan opsi berikut:".to_string(),
            cashless_title: "Cashless".to_string(),
            accounts: vec![
                GiftAccount {
                    bank: "BCA".to_string(),
                    logo: "/assets/Logo-BCA.png".to_string(),
                    holder: "Arya Bintang Samudra".to_string(),
                    number_display: "0462 8048 71".to_string(),
                    number: "0462804871".to_string(),
                    message: "Nomor rekening BCA Arya berhasil disalin!".to_string(),
                },
                GiftAccount {
                    bank: "BCA".to_string(),
                    logo: "/assets/Logo-BCA.png".to_string(),
                    holder: "Dewi Fortuna".to_string(),
                    number_display: "0971 1226 24".to_string(),
                    number: "0971122624".to_string(),
                    message: "Nomor rekening BCA Dewi berhasil disalin!".to_string(),
                },
            ],
            address_title: "Alamat Pengiriman Kado".to_string(),
            address: "Rumah Dewi Fortuna\nJl. Wanasida, Dusun 3\nKebutuh, Bukateja\nPurbalingga, Jawa Tengah\n53382".to_string(),
            address_message: "Alamat berhasil disalin!".to_string(),
            note: "Mohon konfirmasi pengiriman ke kontak mempelai jika sudah mengirimkan kado yaa".to_string(),
            copy_number_label: "Salin No. Rek".to_string(),
            copy_address_label: "Salin Alamat".to_string(),
            copied_label: "Tersalin!".to_string(),
        }
    }
}

/// All text and media shown on the invitation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationContent {
    pub title: String,
    pub couple: String,
    pub greeting: String,
    pub open_label: String,
    pub default_guest: String,
    pub background_image: String,
    pub audio: String,
    pub cover_images: Vec<String>,

    pub salutation: String,
    pub opening: String,
    pub bride: Person,
    pub groom: Person,

    pub story_title: String,
    pub story_subtitle: String,
    pub stories: Vec<Story>,

    pub gallery_title: String,
    pub gallery_subtitle: String,
    pub gallery: Vec<String>,

    pub countdown: CountdownConfig,

    pub events_title: String,
    pub events_subtitle: String,
    pub events: Vec<Event>,

    pub location: Location,
    pub gifts: Gifts,
    pub sections: Vec<Section>,
    pub footer: String,
}

impl Default for InvitationContent {
    fn default() -> Self {
        Self {
            title: "Perayaan Cinta".to_string(),
            couple: "Dewi & Arya".to_string(),
            greeting: "Kepada Yth. Bapak/Ibu/Saudara/i:".to_string(),
            open_label: "Buka Undangan".to_string(),
            default_guest: "Tamu Undangan".to_string(),
            background_image: "/assets/Main-bg.png".to_string(),
            audio: "/assets/music.mp3".to_string(),
            cover_images: assets(&["foto-1.jpg", "foto-2.jpg", "foto-3.jpg"]),

            salutation: "Assalamu'alaikum Warahmatullahi Wabarakatuh".to_string(),
            opening: "Dengan hormat kami mengundang Bapak/Ibu/Saudara/i untuk hadir dalam acara perayaan pernikahan kami".to_string(),
            bride: Person {
                name: "Dewi Fortuna".to_string(),
                parents: "Putri dari Bapak Agus Hariyoto & Ibu Suwiyah".to_string(),
                images: assets(&["foto-8.jpg", "foto-9.jpg", "foto-12.jpg", "foto-13.jpg"]),
            },
            groom: Person {
                name: "Arya Bintang Samudra".to_string(),
                parents: "Putra dari Bapak Imam Mawarto & Ibu Sriwahyuni".to_string(),
                images: assets(&["foto-7.jpg", "foto-6.jpg", "foto-10.jpg", "foto-11.jpg"]),
            },

            story_title: "Kisah Cinta Kami".to_string(),
            story_subtitle: "Perjalanan cinta kami yang akan terus bertambah seterusnya".to_string(),
            stories: vec![
                story("Awal Pertemuan", "Siapa sangka, berawal dari WhatsApp iseng Dewi sepulang kerja pada tahun 2023, \"Kamu suka bunga?\", benih cinta kami mulai bersemi. Obrolan ringan itu berlanjut menjadi chat yang intens, hingga kami merasa nyaman satu sama lain. Pertemuan tak terduga inilah yang menjadi awal segalanya."),
                story("Ikatan Janji Suci", "Cinta yang tak bisa dibendung ini membawa kami pada sebuah janji. Pada bulan Februari 2024, kami memutuskan untuk melangkah ke jenjang pernikahan siri, mengikat janji suci di hadapan Tuhan dan keluarga terdekat. Sebuah awal baru yang sakral bagi kami berdua."),
                story("Kehadiran Malaikat Kecil", "Kebahagiaan kami semakin lengkap dengan kehadiran malaikat kecil di bulan Januari 2025. Putra kami, Kaivan Aryendra Samudra, lahir, mengisi hari-hari kami dengan tawa dan kehangatan yang tak terhingga."),
                story("Pengesahan Cinta Kami", "Mengukuhkan ikatan cinta kami secara resmi di mata negara, pada bulan Februari 2025 kami mendaftarkan pernikahan kami secara sah di hadapan pemerintah."),
                story("Harapan Kami", "Kisah cinta kasih kami akan terus berlanjut, membentuk cerita baru yang lebih indah, dengan harapan setiap langkah yang kami lalui bersama membawa kedamaian, kebahagiaan, dan cinta yang abadi."),
            ],

            gallery_title: "Galeri Foto".to_string(),
            gallery_subtitle: "Momen-momen indah perjalanan kami".to_string(),
            gallery: assets(&[
                "foto-4.jpg",
                "foto-14.jpg",
                "foto-16.jpg",
                "foto-5.jpg",
                "foto-17.jpeg",
                "foto-15.jpg",
            ]),

            countdown: CountdownConfig::default(),

            events_title: "Waktu Acara Perayaan".to_string(),
            events_subtitle: "Merupakan suatu kehormatan dan kebahagiaan bagi kami, apabila Bapak/Ibu/Saudara/i berkenan hadir untuk memberikan doa restu".to_string(),
            events: vec![
                Event {
                    name: "Tasyakuran".to_string(),
                    date: "Sabtu, 21 Juni 2025".to_string(),
                    time: "Pukul 09:00 s.d Selesai".to_string(),
                },
                Event {
                    name: "Resepsi".to_string(),
                    date: "Ahad, 22 Juni 2025".to_string(),
                    time: "Pukul 09:00 s.d Selesai".to_string(),
                },
            ],

            location: Location::default(),
            gifts: Gifts::default(),
            sections: default_sections(),
            footer: "Arya-Dewi".to_string(),
        }
    }
}

fn assets(files: &[&str]) -> Vec<String> {
    files.iter().map(|f| format!("/assets/{}", f)).collect()
}

fn story(title: &str, description: &str) -> Story {
    Story {
        title: title.to_string(),
        description: description.to_string(),
    }
}

impl InvitationContent {
    /// Parses content from JSON, keeping defaults for absent keys
    pub fn from_json(json: &str, origin: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| InvitationError::Content {
            path: origin.to_string(),
            source,
        })
    }

    /// Loads content from a JSON file
    ///
    /// # Errors
    /// * `InvitationError::Io` if the file cannot be read
    /// * `InvitationError::Content` if it is not valid content JSON
    pub fn load(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();
        let json = fs::read_to_string(path).map_err(|source| InvitationError::Io {
            path: origin.clone(),
            source,
        })?;
        let content = Self::from_json(&json, &origin)?;
        log::info!("loaded invitation content from {}", origin);
        Ok(content)
    }

    /// Loads `path` when given, otherwise uses the built-in content
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Offset used for naive countdown targets; out-of-range values fall back to UTC
    pub fn utc_offset(&self) -> FixedOffset {
        let seconds = self.countdown.utc_offset_minutes.checked_mul(60);
        seconds.and_then(FixedOffset::east_opt).unwrap_or_else(|| {
            log::warn!(
                "utc offset of {} minutes is out of range, using UTC",
                self.countdown.utc_offset_minutes
            );
            Utc.fix()
        })
    }

    pub fn countdown_target(&self) -> CountdownTarget {
        CountdownTarget::parse(&self.countdown.target, self.utc_offset())
    }

    pub fn cover_pool(&self) -> Result<ImagePool> {
        ImagePool::new("cover", self.cover_images.clone())
    }

    pub fn bride_pool(&self) -> Result<ImagePool> {
        ImagePool::new("bride", self.bride.images.clone())
    }

    pub fn groom_pool(&self) -> Result<ImagePool> {
        ImagePool::new("groom", self.groom.images.clone())
    }
}
