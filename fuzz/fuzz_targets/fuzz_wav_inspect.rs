#![no_main]

use libfuzzer_sys::fuzz_target;
use speakscore_wav::decode::decode_wav_bytes;
use speakscore_wav::{encode, extract_pcm_data, read_info};

fuzz_target!(|data: &[u8]| {
    let info = read_info(data);
    let pcm = extract_pcm_data(data);

    if let Ok(info) = &info {
        assert!(info.data_offset + info.data_len <= data.len());
    }
    if let Some(pcm) = pcm {
        assert!(pcm.len() <= data.len());
    }

    // Anything the decoder accepts must re-encode into a buffer the inspector accepts
    if let Ok(audio) = decode_wav_bytes(data) {
        if let Ok(wav) = encode(&audio) {
            let reread = read_info(wav.as_bytes()).expect("encoder output must inspect cleanly");
            assert!(reread.is_canonical_pcm16());
        }
    }
});
