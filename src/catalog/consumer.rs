//! HID consumer-control usage codes.
//!
//! Consumer arguments arrive as symbolic `CONSUMER_*` tags. Tags are matched
//! after dropping the prefix and every `_` separator, so `CONSUMER_VOLUME_UP`
//! and `CONSUMER_VOLUMEUP` name the same usage.

use crate::error::{EncodeError, EncodeResult, ResolutionKind};
use std::collections::BTreeMap;

pub const CONSUMER_PREFIX: &str = "CONSUMER_";

// HID Usage Tables 1.12, Consumer page (0x0C). Names are the usage names
// with spaces and punctuation dropped; `VOLUMEUP`/`VOLUMEDOWN` alias the
// increment and decrement usages.
const DEFAULT_CODES: &[(&str, u16)] = &[
    ("CONSUMERCONTROL", 0x0001),
    ("NUMERICKEYPAD", 0x0002),
    ("PROGRAMMABLEBUTTONS", 0x0003),
    ("MICROPHONE", 0x0004),
    ("HEADPHONE", 0x0005),
    ("GRAPHICEQUALIZER", 0x0006),
    ("PLUS10", 0x0020),
    ("PLUS100", 0x0021),
    ("AMPM", 0x0022),
    ("POWER", 0x0030),
    ("RESET", 0x0031),
    ("SLEEP", 0x0032),
    ("SLEEPAFTER", 0x0033),
    ("SLEEPMODE", 0x0034),
    ("ILLUMINATION", 0x0035),
    ("FUNCTIONBUTTONS", 0x0036),
    ("MENU", 0x0040),
    ("MENUPICK", 0x0041),
    ("MENUUP", 0x0042),
    ("MENUDOWN", 0x0043),
    ("MENULEFT", 0x0044),
    ("MENURIGHT", 0x0045),
    ("MENUESCAPE", 0x0046),
    ("MENUVALUEINCREASE", 0x0047),
    ("MENUVALUEDECREASE", 0x0048),
    ("DATAONSCREEN", 0x0060),
    ("CLOSEDCAPTION", 0x0061),
    ("CLOSEDCAPTIONSELECT", 0x0062),
    ("VCRTV", 0x0063),
    ("BROADCASTMODE", 0x0064),
    ("SNAPSHOT", 0x0065),
    ("STILL", 0x0066),
    ("SELECTION", 0x0080),
    ("ASSIGNSELECTION", 0x0081),
    ("MODESTEP", 0x0082),
    ("RECALLLAST", 0x0083),
    ("ENTERCHANNEL", 0x0084),
    ("ORDERMOVIE", 0x0085),
    ("CHANNEL", 0x0086),
    ("MEDIASELECTION", 0x0087),
    ("MEDIASELECTCOMPUTER", 0x0088),
    ("MEDIASELECTTV", 0x0089),
    ("MEDIASELECTWWW", 0x008A),
    ("MEDIASELECTDVD", 0x008B),
    ("MEDIASELECTTELEPHONE", 0x008C),
    ("MEDIASELECTPROGRAMGUIDE", 0x008D),
    ("MEDIASELECTVIDEOPHONE", 0x008E),
    ("MEDIASELECTGAMES", 0x008F),
    ("MEDIASELECTMESSAGES", 0x0090),
    ("MEDIASELECTCD", 0x0091),
    ("MEDIASELECTVCR", 0x0092),
    ("MEDIASELECTTUNER", 0x0093),
    ("QUIT", 0x0094),
    ("HELP", 0x0095),
    ("MEDIASELECTTAPE", 0x0096),
    ("MEDIASELECTCABLE", 0x0097),
    ("MEDIASELECTSATELLITE", 0x0098),
    ("MEDIASELECTSECURITY", 0x0099),
    ("MEDIASELECTHOME", 0x009A),
    ("MEDIASELECTCALL", 0x009B),
    ("CHANNELINCREMENT", 0x009C),
    ("CHANNELDECREMENT", 0x009D),
    ("MEDIASELECTSAP", 0x009E),
    ("VCRPLUS", 0x00A0),
    ("ONCE", 0x00A1),
    ("DAILY", 0x00A2),
    ("WEEKLY", 0x00A3),
    ("MONTHLY", 0x00A4),
    ("PLAY", 0x00B0),
    ("PAUSE", 0x00B1),
    ("RECORD", 0x00B2),
    ("FASTFORWARD", 0x00B3),
    ("REWIND", 0x00B4),
    ("SCANNEXTTRACK", 0x00B5),
    ("SCANPREVIOUSTRACK", 0x00B6),
    ("STOP", 0x00B7),
    ("EJECT", 0x00B8),
    ("RANDOMPLAY", 0x00B9),
    ("SELECTDISC", 0x00BA),
    ("ENTERDISC", 0x00BB),
    ("REPEAT", 0x00BC),
    ("TRACKING", 0x00BD),
    ("TRACKNORMAL", 0x00BE),
    ("SLOWTRACKING", 0x00BF),
    ("FRAMEFORWARD", 0x00C0),
    ("FRAMEBACK", 0x00C1),
    ("MARK", 0x00C2),
    ("CLEARMARK", 0x00C3),
    ("REPEATFROMMARK", 0x00C4),
    ("RETURNTOMARK", 0x00C5),
    ("SEARCHMARKFORWARD", 0x00C6),
    ("SEARCHMARKBACKWARDS", 0x00C7),
    ("COUNTERRESET", 0x00C8),
    ("SHOWCOUNTER", 0x00C9),
    ("TRACKINGINCREMENT", 0x00CA),
    ("TRACKINGDECREMENT", 0x00CB),
    ("STOPEJECT", 0x00CC),
    ("PLAYPAUSE", 0x00CD),
    ("PLAYSKIP", 0x00CE),
    ("VOLUME", 0x00E0),
    ("BALANCE", 0x00E1),
    ("MUTE", 0x00E2),
    ("BASS", 0x00E3),
    ("TREBLE", 0x00E4),
    ("BASSBOOST", 0x00E5),
    ("SURROUNDMODE", 0x00E6),
    ("LOUDNESS", 0x00E7),
    ("MPX", 0x00E8),
    ("VOLUMEINCREMENT", 0x00E9),
    ("VOLUMEUP", 0x00E9),
    ("VOLUMEDECREMENT", 0x00EA),
    ("VOLUMEDOWN", 0x00EA),
    ("SPEEDSELECT", 0x00F0),
    ("PLAYBACKSPEED", 0x00F1),
    ("STANDARDPLAY", 0x00F2),
    ("LONGPLAY", 0x00F3),
    ("EXTENDEDPLAY", 0x00F4),
    ("SLOW", 0x00F5),
    ("FANENABLE", 0x0100),
    ("FANSPEED", 0x0101),
    ("LIGHTENABLE", 0x0102),
    ("LIGHTILLUMINATIONLEVEL", 0x0103),
    ("CLIMATECONTROLENABLE", 0x0104),
    ("ROOMTEMPERATURE", 0x0105),
    ("SECURITYENABLE", 0x0106),
    ("FIREALARM", 0x0107),
    ("POLICEALARM", 0x0108),
    ("PROXIMITY", 0x0109),
    ("MOTION", 0x010A),
    ("DURESSALARM", 0x010B),
    ("HOLDUPALARM", 0x010C),
    ("MEDICALALARM", 0x010D),
    ("BALANCERIGHT", 0x0150),
    ("BALANCELEFT", 0x0151),
    ("BASSINCREMENT", 0x0152),
    ("BASSDECREMENT", 0x0153),
    ("TREBLEINCREMENT", 0x0154),
    ("TREBLEDECREMENT", 0x0155),
    ("SPEAKERSYSTEM", 0x0160),
    ("CHANNELLEFT", 0x0161),
    ("CHANNELRIGHT", 0x0162),
    ("CHANNELCENTER", 0x0163),
    ("CHANNELFRONT", 0x0164),
    ("CHANNELCENTERFRONT", 0x0165),
    ("CHANNELSIDE", 0x0166),
    ("CHANNELSURROUND", 0x0167),
    ("CHANNELLOWFREQUENCYENHANCEMENT", 0x0168),
    ("CHANNELTOP", 0x0169),
    ("CHANNELUNKNOWN", 0x016A),
    ("SUBCHANNEL", 0x0170),
    ("SUBCHANNELINCREMENT", 0x0171),
    ("SUBCHANNELDECREMENT", 0x0172),
    ("ALTERNATEAUDIOINCREMENT", 0x0173),
    ("ALTERNATEAUDIODECREMENT", 0x0174),
    ("APPLICATIONLAUNCHBUTTONS", 0x0180),
    ("ALLAUNCHBUTTONCONFIGURATIONTOOL", 0x0181),
    ("ALPROGRAMMABLEBUTTONCONFIGURATION", 0x0182),
    ("ALCONSUMERCONTROLCONFIGURATION", 0x0183),
    ("ALWORDPROCESSOR", 0x0184),
    ("ALTEXTEDITOR", 0x0185),
    ("ALSPREADSHEET", 0x0186),
    ("ALGRAPHICSEDITOR", 0x0187),
    ("ALPRESENTATIONAPP", 0x0188),
    ("ALDATABASEAPP", 0x0189),
    ("ALEMAILREADER", 0x018A),
    ("ALNEWSREADER", 0x018B),
    ("ALVOICEMAIL", 0x018C),
    ("ALCONTACTSADDRESSBOOK", 0x018D),
    ("ALCALENDARSCHEDULE", 0x018E),
    ("ALTASKPROJECTMANAGER", 0x018F),
    ("ALLOGJOURNALTIMECARD", 0x0190),
    ("ALCHECKBOOKFINANCE", 0x0191),
    ("ALCALCULATOR", 0x0192),
    ("ALAVCAPTUREPLAYBACK", 0x0193),
    ("ALLOCALMACHINEBROWSER", 0x0194),
    ("ALLANWANBROWSER", 0x0195),
    ("ALINTERNETBROWSER", 0x0196),
    ("ALREMOTENETWORKINGISPCONNECT", 0x0197),
    ("ALNETWORKCONFERENCE", 0x0198),
    ("ALNETWORKCHAT", 0x0199),
    ("ALTELEPHONYDIALER", 0x019A),
    ("ALLOGON", 0x019B),
    ("ALLOGOFF", 0x019C),
    ("ALLOGONLOGOFF", 0x019D),
    ("ALTERMINALLOCKSCREENSAVER", 0x019E),
    ("ALCONTROLPANEL", 0x019F),
    ("ALCOMMANDLINEPROCESSORRUN", 0x01A0),
    ("ALPROCESSTASKMANAGER", 0x01A1),
    ("ALSELECTTASKAPPLICATION", 0x01A2),
    ("ALNEXTTASKAPPLICATION", 0x01A3),
    ("ALPREVIOUSTASKAPPLICATION", 0x01A4),
    ("ALPREEMPTIVEHALTTASKAPPLICATION", 0x01A5),
    ("ALINTEGRATEDHELPCENTER", 0x01A6),
    ("ALDOCUMENTS", 0x01A7),
    ("ALTHESAURUS", 0x01A8),
    ("ALDICTIONARY", 0x01A9),
    ("ALDESKTOP", 0x01AA),
    ("ALSPELLCHECK", 0x01AB),
    ("ALGRAMMARCHECK", 0x01AC),
    ("ALWIRELESSSTATUS", 0x01AD),
    ("ALKEYBOARDLAYOUT", 0x01AE),
    ("ALVIRUSPROTECTION", 0x01AF),
    ("ALENCRYPTION", 0x01B0),
    ("ALSCREENSAVER", 0x01B1),
    ("ALALARMS", 0x01B2),
    ("ALCLOCK", 0x01B3),
    ("ALFILEBROWSER", 0x01B4),
    ("ALPOWERSTATUS", 0x01B5),
    ("ALIMAGEBROWSER", 0x01B6),
    ("ALAUDIOBROWSER", 0x01B7),
    ("ALMOVIEBROWSER", 0x01B8),
    ("ALDIGITALRIGHTSMANAGER", 0x01B9),
    ("ALDIGITALWALLET", 0x01BA),
    ("ALINSTANTMESSAGING", 0x01BC),
    ("ALOEMFEATURESTIPSTUTORIALBROWSER", 0x01BD),
    ("ALOEMHELP", 0x01BE),
    ("ALONLINECOMMUNITY", 0x01BF),
    ("ALENTERTAINMENTCONTENTBROWSER", 0x01C0),
    ("ALONLINESHOPPINGBROWSER", 0x01C1),
    ("ALSMARTCARDINFORMATIONHELP", 0x01C2),
    ("ALMARKETMONITORFINANCEBROWSER", 0x01C3),
    ("ALCUSTOMIZEDCORPORATENEWSBROWSER", 0x01C4),
    ("ALONLINEACTIVITYBROWSER", 0x01C5),
    ("ALRESEARCHSEARCHBROWSER", 0x01C6),
    ("ALAUDIOPLAYER", 0x01C7),
    ("GENERICGUIAPPLICATIONCONTROLS", 0x0200),
    ("ACNEW", 0x0201),
    ("ACOPEN", 0x0202),
    ("ACCLOSE", 0x0203),
    ("ACEXIT", 0x0204),
    ("ACMAXIMIZE", 0x0205),
    ("ACMINIMIZE", 0x0206),
    ("ACSAVE", 0x0207),
    ("ACPRINT", 0x0208),
    ("ACPROPERTIES", 0x0209),
    ("ACUNDO", 0x021A),
    ("ACCOPY", 0x021B),
    ("ACCUT", 0x021C),
    ("ACPASTE", 0x021D),
    ("ACSELECTALL", 0x021E),
    ("ACFIND", 0x021F),
    ("ACFINDANDREPLACE", 0x0220),
    ("ACSEARCH", 0x0221),
    ("ACGOTO", 0x0222),
    ("ACHOME", 0x0223),
    ("ACBACK", 0x0224),
    ("ACFORWARD", 0x0225),
    ("ACSTOP", 0x0226),
    ("ACREFRESH", 0x0227),
    ("ACPREVIOUSLINK", 0x0228),
    ("ACNEXTLINK", 0x0229),
    ("ACBOOKMARKS", 0x022A),
    ("ACHISTORY", 0x022B),
    ("ACSUBSCRIPTIONS", 0x022C),
    ("ACZOOMIN", 0x022D),
    ("ACZOOMOUT", 0x022E),
    ("ACZOOM", 0x022F),
    ("ACFULLSCREENVIEW", 0x0230),
    ("ACNORMALVIEW", 0x0231),
    ("ACVIEWTOGGLE", 0x0232),
    ("ACSCROLLUP", 0x0233),
    ("ACSCROLLDOWN", 0x0234),
    ("ACSCROLL", 0x0235),
    ("ACPANLEFT", 0x0236),
    ("ACPANRIGHT", 0x0237),
    ("ACPAN", 0x0238),
    ("ACNEWWINDOW", 0x0239),
    ("ACTILEHORIZONTALLY", 0x023A),
    ("ACTILEVERTICALLY", 0x023B),
    ("ACFORMAT", 0x023C),
    ("ACEDIT", 0x023D),
    ("ACBOLD", 0x023E),
    ("ACITALICS", 0x023F),
    ("ACUNDERLINE", 0x0240),
    ("ACSTRIKETHROUGH", 0x0241),
    ("ACSUBSCRIPT", 0x0242),
    ("ACSUPERSCRIPT", 0x0243),
    ("ACALLCAPS", 0x0244),
    ("ACROTATE", 0x0245),
    ("ACRESIZE", 0x0246),
    ("ACFLIPHORIZONTAL", 0x0247),
    ("ACFLIPVERTICAL", 0x0248),
    ("ACMIRRORHORIZONTAL", 0x0249),
    ("ACMIRRORVERTICAL", 0x024A),
    ("ACFONTSELECT", 0x024B),
    ("ACFONTCOLOR", 0x024C),
    ("ACFONTSIZE", 0x024D),
    ("ACJUSTIFYLEFT", 0x024E),
    ("ACJUSTIFYCENTERH", 0x024F),
    ("ACJUSTIFYRIGHT", 0x0250),
    ("ACJUSTIFYBLOCKH", 0x0251),
    ("ACJUSTIFYTOP", 0x0252),
    ("ACJUSTIFYCENTERV", 0x0253),
    ("ACJUSTIFYBOTTOM", 0x0254),
    ("ACJUSTIFYBLOCKV", 0x0255),
    ("ACINDENTDECREASE", 0x0256),
    ("ACINDENTINCREASE", 0x0257),
    ("ACNUMBEREDLIST", 0x0258),
    ("ACRESTARTNUMBERING", 0x0259),
    ("ACBULLETEDLIST", 0x025A),
    ("ACPROMOTE", 0x025B),
    ("ACDEMOTE", 0x025C),
    ("ACYES", 0x025D),
    ("ACNO", 0x025E),
    ("ACCANCEL", 0x025F),
    ("ACCATALOG", 0x0260),
    ("ACBUYCHECKOUT", 0x0261),
    ("ACADDTOCART", 0x0262),
    ("ACEXPAND", 0x0263),
    ("ACEXPANDALL", 0x0264),
    ("ACCOLLAPSE", 0x0265),
    ("ACCOLLAPSEALL", 0x0266),
    ("ACPRINTPREVIEW", 0x0267),
    ("ACPASTESPECIAL", 0x0268),
    ("ACINSERTMODE", 0x0269),
    ("ACDELETE", 0x026A),
    ("ACLOCK", 0x026B),
    ("ACUNLOCK", 0x026C),
    ("ACPROTECT", 0x026D),
    ("ACUNPROTECT", 0x026E),
    ("ACATTACHCOMMENT", 0x026F),
    ("ACDELETECOMMENT", 0x0270),
    ("ACVIEWCOMMENT", 0x0271),
    ("ACSELECTWORD", 0x0272),
    ("ACSELECTSENTENCE", 0x0273),
    ("ACSELECTPARAGRAPH", 0x0274),
    ("ACSELECTCOLUMN", 0x0275),
    ("ACSELECTROW", 0x0276),
    ("ACSELECTTABLE", 0x0277),
    ("ACSELECTOBJECT", 0x0278),
    ("ACREDOREPEAT", 0x0279),
    ("ACSORT", 0x027A),
    ("ACSORTASCENDING", 0x027B),
    ("ACSORTDESCENDING", 0x027C),
    ("ACFILTER", 0x027D),
    ("ACSETCLOCK", 0x027E),
    ("ACVIEWCLOCK", 0x027F),
    ("ACSELECTTIMEZONE", 0x0280),
    ("ACEDITTIMEZONES", 0x0281),
    ("ACSETALARM", 0x0282),
    ("ACCLEARALARM", 0x0283),
    ("ACSNOOZEALARM", 0x0284),
    ("ACRESETALARM", 0x0285),
    ("ACSYNCHRONIZE", 0x0286),
    ("ACSENDRECEIVE", 0x0287),
    ("ACSENDTO", 0x0288),
    ("ACREPLY", 0x0289),
    ("ACREPLYALL", 0x028A),
    ("ACFORWARDMSG", 0x028B),
    ("ACSEND", 0x028C),
    ("ACATTACHFILE", 0x028D),
    ("ACUPLOAD", 0x028E),
    ("ACDOWNLOAD", 0x028F),
    ("ACSETBORDERS", 0x0290),
    ("ACINSERTROW", 0x0291),
    ("ACINSERTCOLUMN", 0x0292),
    ("ACINSERTFILE", 0x0293),
    ("ACINSERTPICTURE", 0x0294),
    ("ACINSERTOBJECT", 0x0295),
    ("ACINSERTSYMBOL", 0x0296),
    ("ACSAVEANDCLOSE", 0x0297),
    ("ACRENAME", 0x0298),
    ("ACMERGE", 0x0299),
    ("ACSPLIT", 0x029A),
    ("ACDISTRIBUTEHORIZONTALLY", 0x029B),
    ("ACDISTRIBUTEVERTICALLY", 0x029C),
];

/// Strip the `CONSUMER_` prefix (when present) and the `_` separators.
pub fn normalize_tag(raw: &str) -> String {
    let tag = raw.strip_prefix(CONSUMER_PREFIX).unwrap_or(raw);
    tag.replace('_', "")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerCodeTable {
    codes: BTreeMap<String, u16>,
}

impl Default for ConsumerCodeTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ConsumerCodeTable {
    pub fn empty() -> Self {
        Self {
            codes: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        table.extend(DEFAULT_CODES.iter().map(|(tag, code)| (*tag, *code)));
        table
    }

    /// Adds or replaces codes; keys are normalized the same way lookups are.
    pub fn extend<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = (S, u16)>,
        S: AsRef<str>,
    {
        for (tag, code) in codes {
            self.codes.insert(normalize_tag(tag.as_ref()), code);
        }
    }

    /// Resolve a `CONSUMER_*` argument to its 16-bit usage code.
    pub fn lookup(&self, raw: &str) -> EncodeResult<u16> {
        let tag = normalize_tag(raw);
        self.codes
            .get(&tag)
            .copied()
            .ok_or_else(|| EncodeError::unresolved(ResolutionKind::ConsumerCode, tag))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
